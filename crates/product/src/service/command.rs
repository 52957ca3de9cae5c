use crate::{
    abstract_trait::product::{repository::DynProductStore, service::ProductCommandServiceTrait},
    domain::{
        requests::{
            product::{CreateProductRequest, UpdateProductRequest},
            validation_messages,
        },
        response::product::ProductResponse,
    },
    model::StockAdjustment,
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils},
};
use tokio::time::Instant;
use tracing::{error, info, warn};
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandService {
    pub store: DynProductStore,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(store: DynProductStore, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_command_service");

        Self { store, metrics }
    }

    fn validate<T: Validate>(&self, req: &T, method: Method) -> Result<(), ServiceError> {
        req.validate().map_err(|e| {
            let messages = validation_messages(&e);
            warn!("⚠️ Rejected invalid product: {}", messages.join("; "));
            self.metrics.record(method, StatusUtils::Error, 0.0);
            ServiceError::Validation(messages)
        })
    }

    fn complete<T>(
        &self,
        operation: &str,
        method: Method,
        start_time: Instant,
        result: Result<T, RepositoryError>,
    ) -> Result<T, ServiceError> {
        let elapsed = start_time.elapsed().as_secs_f64();

        match result {
            Ok(value) => {
                self.metrics.record(method, StatusUtils::Success, elapsed);
                Ok(value)
            }
            Err(e) => {
                error!("❌ {operation} failed: {e:?}");
                self.metrics.record(method, StatusUtils::Error, elapsed);
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🏗️ Creating product '{}'", req.name);

        self.validate(req, Method::Post)?;

        let start_time = Instant::now();
        let result = self.store.insert(req).await;
        let product = self.complete("create_product", Method::Post, start_time, result)?;

        info!("✅ Product created: ID {}", product.id);
        Ok(ProductResponse::from(product))
    }

    async fn replace_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductResponse>, ServiceError> {
        info!("🔄 Replacing product ID {id}");

        self.validate(req, Method::Put)?;

        let start_time = Instant::now();
        let result = self.store.replace(id, req).await;
        let product = self.complete("replace_product", Method::Put, start_time, result)?;

        if product.is_none() {
            info!("Product ID {id} not found, nothing replaced");
        }
        Ok(product.map(ProductResponse::from))
    }

    async fn delete_product(&self, id: i32) -> Result<bool, ServiceError> {
        info!("🗑️ Deleting product ID {id}");

        let start_time = Instant::now();
        let result = self.store.delete(id).await;
        self.complete("delete_product", Method::Delete, start_time, result)
    }

    async fn adjust_stock(
        &self,
        id: i32,
        delta: i32,
    ) -> Result<StockAdjustment<ProductResponse>, ServiceError> {
        info!("📦 Adjusting stock of product ID {id} by {delta}");

        let start_time = Instant::now();
        let result = self.store.adjust_stock(id, delta).await;
        let outcome = self.complete("adjust_stock", Method::Patch, start_time, result)?;

        match &outcome {
            StockAdjustment::Applied(product) => {
                info!("✅ Stock of product ID {id} is now {}", product.stock)
            }
            StockAdjustment::NotFound => warn!("⚠️ Stock adjustment on missing product ID {id}"),
            StockAdjustment::Rejected(reason) => {
                warn!("⚠️ Stock adjustment on product ID {id} rejected: {reason}")
            }
        }

        Ok(outcome.map(ProductResponse::from))
    }
}
