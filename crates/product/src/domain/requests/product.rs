use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

/// Bounds of a positive `NUMERIC(10, 2)` price.
pub const MIN_PRICE: f64 = 0.01;
pub const MAX_PRICE: f64 = 99_999_999.99;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    /// Honoured by the in-memory store only; the relational store assigns ids itself.
    #[serde(default)]
    #[schema(example = 8)]
    pub id: Option<i32>,

    #[validate(length(min = 1, max = 150, message = "Name must be 1 to 150 characters"))]
    #[schema(example = "Mouse")]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    #[schema(example = "Mouse inalámbrico")]
    pub description: Option<String>,

    #[validate(range(
        min = MIN_PRICE,
        max = MAX_PRICE,
        message = "Price must be between 0.01 and 99999999.99"
    ))]
    #[schema(example = 25.50)]
    pub price: f64,

    #[validate(length(min = 1, max = 80, message = "Category must be 1 to 80 characters"))]
    #[schema(example = "Periféricos")]
    pub category: String,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 50)]
    pub stock: i32,
}

/// Full replacement of every mutable field; nothing from the previous
/// version is kept.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 150, message = "Name must be 1 to 150 characters"))]
    #[schema(example = "Teclado RGB")]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(range(
        min = MIN_PRICE,
        max = MAX_PRICE,
        message = "Price must be between 0.01 and 99999999.99"
    ))]
    #[schema(example = 150.0)]
    pub price: f64,

    #[validate(length(min = 1, max = 80, message = "Category must be 1 to 80 characters"))]
    #[schema(example = "Gaming")]
    pub category: String,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 15)]
    pub stock: i32,
}

impl From<CreateProductRequest> for UpdateProductRequest {
    fn from(value: CreateProductRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            price: value.price,
            category: value.category,
            stock: value.stock,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LowStockQuery {
    /// Inclusive upper bound on stock.
    #[serde(default = "default_threshold")]
    pub threshold: i32,
}

fn default_threshold() -> i32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceRangeQuery {
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockAdjustQuery {
    /// Signed delta: negative consumes stock, positive restocks.
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::validation_messages;

    fn valid_request() -> CreateProductRequest {
        CreateProductRequest {
            id: None,
            name: "Laptop Test".into(),
            description: Some("Laptop de prueba".into()),
            price: 999.99,
            category: "Electrónica".into(),
            stock: 10,
        }
    }

    #[test]
    fn accepts_valid_product() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_price() {
        let mut req = valid_request();
        req.price = 0.0;
        let errors = req.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec!["price: Price must be between 0.01 and 99999999.99".to_string()]
        );

        req.price = -10.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_prices_that_do_not_fit_two_decimal_column() {
        for price in [0.001, 0.009, 1e8, 1e9] {
            let mut req = valid_request();
            req.price = price;
            assert!(req.validate().is_err(), "price {price} accepted");

            let update: UpdateProductRequest = req.into();
            assert!(update.validate().is_err(), "price {price} accepted on update");
        }

        let mut req = valid_request();
        req.price = MIN_PRICE;
        assert!(req.validate().is_ok());
        req.price = MAX_PRICE;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized_strings() {
        let mut req = valid_request();
        req.name = String::new();
        req.category = "c".repeat(81);
        req.description = Some("d".repeat(501));

        let messages = validation_messages(&req.validate().unwrap_err());
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().any(|m| m.starts_with("name:")));
        assert!(messages.iter().any(|m| m.starts_with("category:")));
        assert!(messages.iter().any(|m| m.starts_with("description:")));
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        let mut req = valid_request();
        req.name = "ñ".repeat(150);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_negative_stock() {
        let mut req = valid_request();
        req.stock = -1;
        assert!(req.validate().is_err());
    }

    #[test]
    fn low_stock_threshold_defaults_to_five() {
        let query: LowStockQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    }
}
