use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Why a stock adjustment was refused. The record is never touched when one
/// of these is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StockRejection {
    #[error("stock {current} cannot be adjusted by {delta}: result would be negative")]
    Underflow { current: i32, delta: i32 },

    #[error("stock {current} cannot be adjusted by {delta}: result is out of range")]
    Overflow { current: i32, delta: i32 },
}

/// Outcome of a read-decide-write stock adjustment on a single product.
#[derive(Debug, Clone, PartialEq)]
pub enum StockAdjustment<T = Product> {
    Applied(T),
    NotFound,
    Rejected(StockRejection),
}

impl<T> StockAdjustment<T> {
    pub fn map<U, F>(self, f: F) -> StockAdjustment<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            StockAdjustment::Applied(value) => StockAdjustment::Applied(f(value)),
            StockAdjustment::NotFound => StockAdjustment::NotFound,
            StockAdjustment::Rejected(rejection) => StockAdjustment::Rejected(rejection),
        }
    }

    pub fn applied(self) -> Option<T> {
        match self {
            StockAdjustment::Applied(value) => Some(value),
            _ => None,
        }
    }
}

impl Product {
    /// Stock level after applying `delta`, or the reason it must be refused.
    pub fn stock_after(&self, delta: i32) -> Result<i32, StockRejection> {
        match self.stock.checked_add(delta) {
            Some(new_stock) if new_stock >= 0 => Ok(new_stock),
            Some(_) => Err(StockRejection::Underflow {
                current: self.stock,
                delta,
            }),
            None if delta < 0 => Err(StockRejection::Underflow {
                current: self.stock,
                delta,
            }),
            None => Err(StockRejection::Overflow {
                current: self.stock,
                delta,
            }),
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_stock(stock: i32) -> Product {
        Product {
            id: 1,
            name: "Mouse".into(),
            description: None,
            price: 25.50,
            category: "Periféricos".into(),
            stock,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn stock_after_accepts_exact_depletion() {
        assert_eq!(product_with_stock(10).stock_after(-10), Ok(0));
        assert_eq!(product_with_stock(10).stock_after(5), Ok(15));
        assert_eq!(product_with_stock(0).stock_after(0), Ok(0));
    }

    #[test]
    fn stock_after_rejects_negative_result() {
        assert_eq!(
            product_with_stock(40).stock_after(-100),
            Err(StockRejection::Underflow {
                current: 40,
                delta: -100
            })
        );
    }

    #[test]
    fn stock_after_rejects_overflow_instead_of_wrapping() {
        assert!(matches!(
            product_with_stock(i32::MAX).stock_after(1),
            Err(StockRejection::Overflow { .. })
        ));
    }

    #[test]
    fn in_stock_requires_positive_quantity() {
        assert!(product_with_stock(1).is_in_stock());
        assert!(!product_with_stock(0).is_in_stock());
    }

    #[test]
    fn map_preserves_rejections() {
        let rejected: StockAdjustment<i32> = StockAdjustment::Rejected(StockRejection::Underflow {
            current: 1,
            delta: -2,
        });
        assert_eq!(
            rejected.map(|v| v.to_string()),
            StockAdjustment::Rejected(StockRejection::Underflow {
                current: 1,
                delta: -2
            })
        );
        assert_eq!(StockAdjustment::Applied(3).map(|v| v * 2).applied(), Some(6));
    }
}
