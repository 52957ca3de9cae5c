use crate::{
    abstract_trait::product::{repository::DynProductStore, service::ProductQueryServiceTrait},
    domain::response::product::{ProductResponse, StockStatusResponse},
    model::ProductFilter,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub store: DynProductStore,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(store: DynProductStore, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_query_service");

        Self { store, metrics }
    }

    fn complete<T>(
        &self,
        operation: &str,
        start_time: Instant,
        result: Result<T, RepositoryError>,
    ) -> Result<T, ServiceError> {
        let elapsed = start_time.elapsed().as_secs_f64();

        match result {
            Ok(value) => {
                self.metrics
                    .record(Method::Get, StatusUtils::Success, elapsed);
                Ok(value)
            }
            Err(e) => {
                error!("❌ {operation} failed: {e:?}");
                self.metrics.record(Method::Get, StatusUtils::Error, elapsed);
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn filter(
        &self,
        operation: &str,
        filter: ProductFilter,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        let start_time = Instant::now();
        let result = self.store.find_by_filter(&filter).await;
        let products = self.complete(operation, start_time, result)?;

        info!("✅ {operation}: {} product(s) matched", products.len());
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🔍 Finding all products");

        let start_time = Instant::now();
        let result = self.store.list_all().await;
        let products = self.complete("find_all", start_time, result)?;

        info!("✅ Found {} products", products.len());
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let start_time = Instant::now();
        let result = self.store.find_by_id(id).await;
        let product = self.complete("find_by_id", start_time, result)?;

        if product.is_none() {
            info!("Product ID {id} not found");
        }
        Ok(product.map(ProductResponse::from))
    }

    async fn find_by_exact_name(
        &self,
        name: &str,
    ) -> Result<Option<ProductResponse>, ServiceError> {
        info!("🔤 Finding product by exact name: '{name}'");

        let products = self
            .filter("find_by_exact_name", ProductFilter::ExactName(name.into()))
            .await?;

        Ok(products.into_iter().next())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🏷️ Finding products in category: '{category}'");

        self.filter("find_by_category", ProductFilter::Category(category.into()))
            .await
    }

    async fn find_by_price_range(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("💰 Finding products priced between {min} and {max}");

        // Also catches NaN bounds, which PostgreSQL would sort above every price.
        if !(min <= max) {
            return Ok(Vec::new());
        }

        self.filter("find_by_price_range", ProductFilter::PriceRange { min, max })
            .await
    }

    async fn find_low_stock(&self, threshold: i32) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("📉 Finding products with stock <= {threshold}");

        self.filter("find_low_stock", ProductFilter::LowStock { threshold })
            .await
    }

    async fn is_in_stock(&self, id: i32) -> Result<bool, ServiceError> {
        let start_time = Instant::now();
        let result = self.store.find_by_id(id).await;
        let product = self.complete("is_in_stock", start_time, result)?;

        Ok(product.is_some_and(|p| p.is_in_stock()))
    }

    async fn stock_status(&self, id: i32) -> Result<Option<StockStatusResponse>, ServiceError> {
        info!("📦 Checking stock of product ID {id}");

        let start_time = Instant::now();
        let result = self.store.find_by_id(id).await;
        let product = self.complete("stock_status", start_time, result)?;

        Ok(product.map(StockStatusResponse::from))
    }
}
