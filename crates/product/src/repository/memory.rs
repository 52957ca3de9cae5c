use crate::{
    abstract_trait::product::repository::ProductStoreTrait,
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::{Product as ProductModel, ProductFilter, StockAdjustment},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug)]
struct Catalog {
    products: Vec<ProductModel>,
    /// Widened so an explicit `i32::MAX` still leaves a representable successor.
    next_id: i64,
}

impl Catalog {
    fn position(&self, id: i32) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

/// Insertion-ordered product list guarded by a single lock.
///
/// Writers hold the lock for the whole read-decide-write, so concurrent
/// mutations on the same id are serialized.
#[derive(Debug)]
pub struct InMemoryProductStore {
    catalog: RwLock<Catalog>,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog {
                products: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl ProductStoreTrait for InMemoryProductStore {
    async fn insert(&self, req: &CreateProductRequest) -> Result<ProductModel, RepositoryError> {
        let mut catalog = self.catalog.write().await;

        let id = match req.id {
            Some(id) if catalog.position(id).is_some() => {
                warn!("⚠️ Product ID {id} already exists");
                return Err(RepositoryError::DuplicateId(id));
            }
            Some(id) => id,
            None => i32::try_from(catalog.next_id).map_err(|_| {
                RepositoryError::Custom("product id space exhausted".to_string())
            })?,
        };

        catalog.next_id = catalog.next_id.max(i64::from(id) + 1);

        let product = ProductModel {
            id,
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            category: req.category.clone(),
            stock: req.stock,
            created_at: None,
            updated_at: None,
        };
        catalog.products.push(product.clone());

        info!("✅ Created product ID {} ({})", product.id, product.name);
        Ok(product)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let catalog = self.catalog.read().await;
        Ok(catalog.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_filter(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        let catalog = self.catalog.read().await;
        Ok(catalog
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self.catalog.read().await.products.clone())
    }

    async fn replace(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let mut catalog = self.catalog.write().await;

        let Some(index) = catalog.position(id) else {
            return Ok(None);
        };

        let replacement = ProductModel {
            id,
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            category: req.category.clone(),
            stock: req.stock,
            created_at: None,
            updated_at: None,
        };
        catalog.products[index] = replacement.clone();

        info!("🔄 Replaced product ID {id}");
        Ok(Some(replacement))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut catalog = self.catalog.write().await;

        match catalog.position(id) {
            Some(index) => {
                catalog.products.remove(index);
                info!("🗑️ Deleted product ID {id}");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn adjust_stock(
        &self,
        id: i32,
        delta: i32,
    ) -> Result<StockAdjustment<ProductModel>, RepositoryError> {
        let mut catalog = self.catalog.write().await;

        let Some(product) = catalog.products.iter_mut().find(|p| p.id == id) else {
            return Ok(StockAdjustment::NotFound);
        };

        match product.stock_after(delta) {
            Ok(new_stock) => {
                product.stock = new_stock;
                Ok(StockAdjustment::Applied(product.clone()))
            }
            Err(rejection) => Ok(StockAdjustment::Rejected(rejection)),
        }
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.catalog.read().await.products.len() as i64)
    }
}
