use crate::{
    abstract_trait::product::{
        repository::{DynProductStore, ProductStoreTrait},
        service::{DynProductCommandService, ProductCommandServiceTrait},
    },
    domain::requests::product::CreateProductRequest,
};
use shared::errors::ServiceError;
use tracing::info;

fn sample(
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    stock: i32,
) -> CreateProductRequest {
    CreateProductRequest {
        id: None,
        name: name.into(),
        description: Some(description.into()),
        price,
        category: category.into(),
        stock,
    }
}

/// Demo catalogue loaded by `SEED_DATA=true`.
pub fn sample_products() -> Vec<CreateProductRequest> {
    vec![
        sample(
            "Teclado mecánico",
            "Teclado mecánico con switches azules y retroiluminación RGB",
            249.99,
            "Periféricos",
            15,
        ),
        sample(
            "Mouse inalámbrico",
            "Mouse ergonómico inalámbrico con sensor óptico de alta precisión",
            89.5,
            "Periféricos",
            30,
        ),
        sample(
            "Monitor 24 pulgadas",
            "Monitor Full HD de 24 pulgadas con panel IPS",
            699.99,
            "Pantallas",
            8,
        ),
        sample(
            "Disco SSD 1TB",
            "Unidad de estado sólido SSD de 1TB para alto rendimiento",
            459.0,
            "Almacenamiento",
            20,
        ),
        sample(
            "Audífonos gaming",
            "Audífonos gaming con micrófono y sonido envolvente",
            179.99,
            "Audio",
            0,
        ),
        sample(
            "Laptop Gaming",
            "Laptop de alto rendimiento con RTX 4060 y 16GB RAM",
            1299.99,
            "Computadoras",
            5,
        ),
        sample(
            "Webcam HD",
            "Cámara web Full HD con micrófono incorporado",
            79.99,
            "Periféricos",
            12,
        ),
    ]
}

/// Inserts [`sample_products`] through the command service unless the store
/// already holds products. Returns how many were inserted.
pub async fn seed_if_empty(
    store: &DynProductStore,
    command: &DynProductCommandService,
) -> Result<usize, ServiceError> {
    let existing = store.count().await?;
    if existing > 0 {
        info!("🌱 Store already has {existing} products, skipping seed");
        return Ok(0);
    }

    let products = sample_products();
    for product in &products {
        command.create_product(product).await?;
    }

    info!("🌱 Seeded {} sample products", products.len());
    Ok(products.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{di::DependenciesInject, repository::InMemoryProductStore};
    use prometheus_client::registry::Registry;
    use std::sync::Arc;
    use validator::Validate;

    #[test]
    fn sample_products_are_valid() {
        let products = sample_products();
        assert_eq!(products.len(), 7);
        assert!(products.iter().all(|p| p.validate().is_ok()));
        assert_eq!(products.iter().filter(|p| p.stock == 0).count(), 1);
    }

    #[tokio::test]
    async fn seeds_only_an_empty_store() {
        let deps = DependenciesInject::new(
            Arc::new(InMemoryProductStore::new()),
            &mut Registry::default(),
        );

        let first = seed_if_empty(&deps.product_store, &deps.product_command)
            .await
            .unwrap();
        let second = seed_if_empty(&deps.product_store, &deps.product_command)
            .await
            .unwrap();

        assert_eq!(first, 7);
        assert_eq!(second, 0);
        assert_eq!(deps.product_store.count().await.unwrap(), 7);
    }
}
