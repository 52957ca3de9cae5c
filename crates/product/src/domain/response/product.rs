use crate::model::Product as ProductModel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            category: value.category,
            stock: value.stock,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockStatusResponse {
    pub id: i32,
    pub name: String,
    pub stock: i32,
    pub available: bool,
}

impl From<ProductModel> for StockStatusResponse {
    fn from(value: ProductModel) -> Self {
        StockStatusResponse {
            available: value.is_in_stock(),
            id: value.id,
            name: value.name,
            stock: value.stock,
        }
    }
}
