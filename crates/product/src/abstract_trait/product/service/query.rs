use crate::domain::response::product::{ProductResponse, StockStatusResponse};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductResponse>, ServiceError>;
    async fn find_by_exact_name(&self, name: &str)
    -> Result<Option<ProductResponse>, ServiceError>;
    async fn find_by_category(&self, category: &str) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_by_price_range(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_low_stock(&self, threshold: i32) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn is_in_stock(&self, id: i32) -> Result<bool, ServiceError>;
    async fn stock_status(&self, id: i32) -> Result<Option<StockStatusResponse>, ServiceError>;
}
