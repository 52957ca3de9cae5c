use product::{
    abstract_trait::product::{
        repository::ProductStoreTrait,
        service::{ProductCommandServiceTrait, ProductQueryServiceTrait},
    },
    di::DependenciesInject,
    domain::requests::product::CreateProductRequest,
    model::{StockAdjustment, StockRejection},
    repository::InMemoryProductStore,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;

fn deps() -> DependenciesInject {
    DependenciesInject::new(
        Arc::new(InMemoryProductStore::new()),
        &mut Registry::default(),
    )
}

fn request(name: &str, price: f64, category: &str, stock: i32) -> CreateProductRequest {
    CreateProductRequest {
        id: None,
        name: name.into(),
        description: None,
        price,
        category: category.into(),
        stock,
    }
}

#[tokio::test]
async fn inserted_product_reads_back_unchanged() {
    let deps = deps();
    let req = CreateProductRequest {
        description: Some("Mouse inalámbrico".into()),
        ..request("Mouse", 25.50, "Periféricos", 50)
    };

    let created = deps.product_command.create_product(&req).await.unwrap();
    let fetched = deps
        .product_query
        .find_by_id(created.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, req.name);
    assert_eq!(fetched.description, req.description);
    assert_eq!(fetched.price, req.price);
    assert_eq!(fetched.category, req.category);
    assert_eq!(fetched.stock, req.stock);
}

#[tokio::test]
async fn mouse_stock_scenario() {
    let deps = deps();
    let mouse = deps
        .product_command
        .create_product(&request("Mouse", 25.50, "Periféricos", 50))
        .await
        .unwrap();

    let after_sale = deps.product_command.adjust_stock(mouse.id, -10).await.unwrap();
    assert_eq!(after_sale.applied().map(|p| p.stock), Some(40));

    let oversold = deps
        .product_command
        .adjust_stock(mouse.id, -100)
        .await
        .unwrap();
    assert!(matches!(
        oversold,
        StockAdjustment::Rejected(StockRejection::Underflow { current: 40, .. })
    ));

    let status = deps
        .product_query
        .stock_status(mouse.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status.stock, 40);
    assert!(status.available);
}

#[tokio::test]
async fn category_scenario_returns_exactly_the_matches() {
    let deps = deps();
    for (name, category) in [
        ("Laptop", "Computadoras"),
        ("Desktop", "Computadoras"),
        ("Mouse", "Periféricos"),
    ] {
        deps.product_command
            .create_product(&request(name, 100.0, category, 1))
            .await
            .unwrap();
    }

    let found = deps
        .product_query
        .find_by_category("Computadoras")
        .await
        .unwrap();
    let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Laptop", "Desktop"]);
}

#[tokio::test]
async fn low_stock_scenario() {
    let deps = deps();
    for (i, stock) in [15, 30, 8, 20, 0].into_iter().enumerate() {
        deps.product_command
            .create_product(&request(&format!("P{i}"), 10.0, "x", stock))
            .await
            .unwrap();
    }

    let low = deps.product_query.find_low_stock(5).await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].stock, 0);
}

#[tokio::test]
async fn replace_of_absent_id_leaves_store_unchanged() {
    let deps = deps();
    let kept = deps
        .product_command
        .create_product(&request("Teclado", 100.0, "Periféricos", 10))
        .await
        .unwrap();

    let replaced = deps
        .product_command
        .replace_product(kept.id + 1, &request("Otro", 1.0, "x", 1).into())
        .await
        .unwrap();

    assert!(replaced.is_none());
    let all = deps.product_query.find_all().await.unwrap();
    assert_eq!(all, vec![kept]);
}

#[tokio::test]
async fn duplicate_names_are_kept() {
    let deps = deps();
    let first = deps
        .product_command
        .create_product(&request("Mouse", 10.0, "Periféricos", 1))
        .await
        .unwrap();
    deps.product_command
        .create_product(&request("Mouse", 12.0, "Periféricos", 2))
        .await
        .unwrap();

    assert_eq!(deps.product_store.count().await.unwrap(), 2);
    let by_name = deps
        .product_query
        .find_by_exact_name("mouse")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, first.id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sales_never_oversell() {
    let deps = deps();
    let id = deps
        .product_command
        .create_product(&request("Webcam HD", 79.99, "Periféricos", 12))
        .await
        .unwrap()
        .id;

    let mut handles = Vec::new();
    for _ in 0..50 {
        let command = deps.product_command.clone();
        handles.push(tokio::spawn(async move {
            command.adjust_stock(id, -1).await.unwrap()
        }));
    }

    let mut applied = 0;
    for handle in handles {
        if let StockAdjustment::Applied(_) = handle.await.unwrap() {
            applied += 1;
        }
    }

    assert_eq!(applied, 12);
    let stored = deps
        .product_store
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.stock, 0);
}
