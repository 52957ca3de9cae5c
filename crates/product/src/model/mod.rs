pub mod filter;
pub mod product;

pub use self::filter::ProductFilter;
pub use self::product::{Product, StockAdjustment, StockRejection};
