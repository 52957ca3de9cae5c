use crate::{
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
    model::StockAdjustment,
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError>;
    async fn replace_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductResponse>, ServiceError>;
    async fn delete_product(&self, id: i32) -> Result<bool, ServiceError>;
    async fn adjust_stock(
        &self,
        id: i32,
        delta: i32,
    ) -> Result<StockAdjustment<ProductResponse>, ServiceError>;
}
