use crate::{
    abstract_trait::product::repository::ProductStoreTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::{Product as ProductModel, ProductFilter, StockAdjustment},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{debug, error, info};

const SCHEMA: &str = include_str!("../../schema/products.sql");

#[derive(Clone)]
pub struct PostgresProductStore {
    db: ConnectionPool,
}

impl PostgresProductStore {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    /// Creates the `products` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA).execute(&self.db).await.map_err(|e| {
            error!("❌ Failed to create products table: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("🗄️ products table ready");
        Ok(())
    }
}

#[async_trait]
impl ProductStoreTrait for PostgresProductStore {
    async fn insert(&self, req: &CreateProductRequest) -> Result<ProductModel, RepositoryError> {
        if let Some(id) = req.id {
            debug!("Ignoring caller-supplied id {id}; the database assigns ids");
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, description, price, category, stock, created_at, updated_at)
            VALUES ($1, $2, CAST($3::FLOAT8 AS NUMERIC(10, 2)), $4, $5, current_timestamp, current_timestamp)
            RETURNING id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(&req.category)
        .bind(req.stock)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {} ({})", result.id, result.name);
        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {}: {:?}", id, e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_filter(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        // NUMERIC orders NaN above every value, so an unordered range would match everything.
        if matches!(filter, ProductFilter::PriceRange { min, max } if !(min <= max)) {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let query = match filter {
            ProductFilter::ExactName(name) => sqlx::query_as::<_, ProductModel>(
                r#"
                SELECT id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
                FROM products
                WHERE LOWER(name) = LOWER($1)
                ORDER BY id
                LIMIT 1
                "#,
            )
            .bind(name),
            ProductFilter::Category(category) => sqlx::query_as::<_, ProductModel>(
                r#"
                SELECT id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
                FROM products
                WHERE LOWER(category) = LOWER($1)
                ORDER BY id
                "#,
            )
            .bind(category),
            ProductFilter::PriceRange { min, max } => sqlx::query_as::<_, ProductModel>(
                r#"
                SELECT id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
                FROM products
                WHERE price::FLOAT8 >= $1 AND price::FLOAT8 <= $2
                ORDER BY id
                "#,
            )
            .bind(*min)
            .bind(*max),
            ProductFilter::LowStock { threshold } => sqlx::query_as::<_, ProductModel>(
                r#"
                SELECT id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
                FROM products
                WHERE stock <= $1
                ORDER BY id
                "#,
            )
            .bind(*threshold),
        };

        query.fetch_all(&mut *conn).await.map_err(|e| {
            error!("❌ Failed to filter products by {:?}: {:?}", filter, e);
            RepositoryError::from(e)
        })
    }

    async fn list_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn replace(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = CAST($4::FLOAT8 AS NUMERIC(10, 2)),
                category = $5,
                stock = $6,
                updated_at = current_timestamp
            WHERE id = $1
            RETURNING id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(&req.category)
        .bind(req.stock)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to replace product ID {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        if result.is_some() {
            info!("🔄 Replaced product ID {id}");
        }
        Ok(result)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted product ID {id}");
        }
        Ok(deleted)
    }

    async fn adjust_stock(
        &self,
        id: i32,
        delta: i32,
    ) -> Result<StockAdjustment<ProductModel>, RepositoryError> {
        // Dropping `tx` on an early return rolls the transaction back.
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let current = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
            FROM products
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to lock product {} for stock update: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        let Some(current) = current else {
            return Ok(StockAdjustment::NotFound);
        };

        let new_stock = match current.stock_after(delta) {
            Ok(new_stock) => new_stock,
            Err(rejection) => return Ok(StockAdjustment::Rejected(rejection)),
        };

        let updated = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET stock = $2,
                updated_at = current_timestamp
            WHERE id = $1
            RETURNING id, name, description, price::FLOAT8 AS price, category, stock, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(new_stock)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to update stock of product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Adjusted stock of product ID {} by {} (new stock: {})",
            updated.id, delta, updated.stock
        );
        Ok(StockAdjustment::Applied(updated))
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.db)
            .await
            .map_err(RepositoryError::from)
    }
}
