use crate::model::product::Product;

/// Read-side predicates supported by every store.
///
/// Kept as a closed set so the relational store can translate each variant to
/// a `WHERE` clause while the in-memory store evaluates [`ProductFilter::matches`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    /// Case-insensitive exact match on `name`.
    ExactName(String),
    /// Case-insensitive exact match on `category`.
    Category(String),
    /// `min <= price <= max`; empty when `min > max`.
    PriceRange { min: f64, max: f64 },
    /// `stock <= threshold`.
    LowStock { threshold: i32 },
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::ExactName(name) => eq_ignore_case(&product.name, name),
            ProductFilter::Category(category) => eq_ignore_case(&product.category, category),
            ProductFilter::PriceRange { min, max } => *min <= product.price && product.price <= *max,
            ProductFilter::LowStock { threshold } => product.stock <= *threshold,
        }
    }
}

fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: &str, price: f64, stock: i32) -> Product {
        Product {
            id: 1,
            name: name.into(),
            description: None,
            price,
            category: category.into(),
            stock,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn name_match_is_exact_but_case_insensitive() {
        let p = product("Teclado mecánico", "Periféricos", 249.99, 15);

        assert!(ProductFilter::ExactName("TECLADO MECÁNICO".into()).matches(&p));
        assert!(!ProductFilter::ExactName("Teclado".into()).matches(&p));
    }

    #[test]
    fn category_match_ignores_case() {
        let p = product("Audífonos gaming", "Audio", 179.99, 0);

        assert!(ProductFilter::Category("audio".into()).matches(&p));
        assert!(!ProductFilter::Category("Audi".into()).matches(&p));
    }

    #[test]
    fn price_range_is_inclusive_and_empty_when_inverted() {
        let p = product("Mouse", "Periféricos", 25.50, 50);

        assert!(ProductFilter::PriceRange { min: 25.50, max: 25.50 }.matches(&p));
        assert!(ProductFilter::PriceRange { min: 10.0, max: 30.0 }.matches(&p));
        assert!(!ProductFilter::PriceRange { min: 30.0, max: 10.0 }.matches(&p));
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        assert!(ProductFilter::LowStock { threshold: 5 }.matches(&product("a", "b", 1.0, 5)));
        assert!(!ProductFilter::LowStock { threshold: 5 }.matches(&product("a", "b", 1.0, 6)));
    }
}
