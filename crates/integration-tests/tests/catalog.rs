//! Catalog reads over HTTP: listing, lookup, caching, categories.

#![allow(clippy::unwrap_used)]

use pawstore_core::{CategoryId, ProductId};
use pawstore_integration_tests::{MockBackend, product, storefront_over};
use pawstore_storefront::api::ApiError;
use pawstore_storefront::models::Category;

#[tokio::test]
async fn test_lists_available_products() {
    let mock = MockBackend::spawn().await;
    mock.add_product(product(1, "Rope toy", 4500, 10, false));
    mock.add_product(product(2, "Salmon treats", 10000, 3, true));
    let (store, _notifier) = storefront_over(&mock);

    let products = store.backend().available_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products.first().unwrap().description, "Rope toy");
}

#[tokio::test]
async fn test_product_lookup_and_not_found() {
    let mock = MockBackend::spawn().await;
    mock.add_product(product(7, "Grooming brush", 7000, 4, true));
    let (store, _notifier) = storefront_over(&mock);

    let found = store.backend().product(ProductId::new(7)).await.unwrap();
    assert_eq!(found.description, "Grooming brush");
    assert_eq!(found.stock_available, 4);

    let err = store
        .backend()
        .product(ProductId::new(99))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_product_reads_are_cached() {
    let mock = MockBackend::spawn().await;
    mock.add_product(product(7, "Grooming brush", 7000, 4, true));
    let (store, _notifier) = storefront_over(&mock);

    let first = store.backend().product(ProductId::new(7)).await.unwrap();

    // A stock change on the backend is invisible within the cache TTL.
    mock.add_product(product(7, "Grooming brush", 7000, 0, true));
    let second = store.backend().product(ProductId::new(7)).await.unwrap();
    assert_eq!(second.stock_available, first.stock_available);
}

#[tokio::test]
async fn test_lists_categories() {
    let mock = MockBackend::spawn().await;
    mock.add_category(Category {
        id: CategoryId::new(1),
        description: "Toys".to_string(),
    });
    mock.add_category(Category {
        id: CategoryId::new(2),
        description: "Treats".to_string(),
    });
    let (store, _notifier) = storefront_over(&mock);

    let categories = store.backend().categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert!(categories.iter().any(|c| c.description == "Treats"));
}
