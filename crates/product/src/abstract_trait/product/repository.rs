use crate::{
    domain::requests::product::{CreateProductRequest, UpdateProductRequest},
    model::{Product as ProductModel, ProductFilter, StockAdjustment},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductStore = Arc<dyn ProductStoreTrait + Send + Sync>;

/// Canonical holder of product records.
///
/// Implementations enforce only `id` uniqueness; every other rule lives in the
/// services, except the stock check which must run inside the store's own
/// critical section (see [`ProductStoreTrait::adjust_stock`]).
#[async_trait]
pub trait ProductStoreTrait {
    async fn insert(&self, req: &CreateProductRequest) -> Result<ProductModel, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_filter(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn replace(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<Option<ProductModel>, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
    /// Reads the current stock, applies [`ProductModel::stock_after`] and
    /// writes the result as one unit. Rejections leave the record untouched.
    async fn adjust_stock(
        &self,
        id: i32,
        delta: i32,
    ) -> Result<StockAdjustment<ProductModel>, RepositoryError>;
    async fn count(&self) -> Result<i64, RepositoryError>;
}
