//! End-to-end cart flows against the mock backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use pawstore_integration_tests::{MockBackend, product, standard_parameters, storefront_over};
use pawstore_storefront::cart::CartEngine;
use pawstore_storefront::cart::store::{CartStore, FileStorage, KeyValueStorage};
use pawstore_storefront::notify::{Notifier, RecordingNotifier};
use pawstore_storefront::params::ParameterCache;
use pawstore_storefront::state::Storefront;
use rust_decimal::Decimal;

async fn mock_with_cap(cap: i64) -> MockBackend {
    let mock = MockBackend::spawn().await;
    mock.set_parameters(standard_parameters(cap, 3, "19"));
    mock
}

#[tokio::test]
async fn test_daily_cap_enforced_over_http() {
    let mock = mock_with_cap(3).await;
    let (store, notifier) = storefront_over(&mock);

    let toy = product(1, "Rope toy", 4500, 10, false);
    let treats = product(2, "Salmon treats", 10000, 10, true);

    let mut cart = store.cart().lock().await;
    assert!(cart.add_item(&toy, 2).await);
    assert_eq!(cart.today_item_count(), 2);

    // 2 + 2 > 3: rejected, cart unchanged
    assert!(!cart.add_item(&treats, 2).await);
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.today_item_count(), 2);
    assert!(notifier.saw("3 items per day"));
}

#[tokio::test]
async fn test_cap_change_honored_by_next_mutation() {
    let mock = mock_with_cap(5).await;
    let (store, _notifier) = storefront_over(&mock);

    let toy = product(1, "Rope toy", 4500, 20, false);
    let brush = product(2, "Grooming brush", 7000, 20, false);

    let mut cart = store.cart().lock().await;
    assert!(cart.add_item(&toy, 3).await);

    // An admin tightens the cap between two cart actions; the very next
    // add must see it.
    mock.set_parameters(standard_parameters(3, 3, "19"));
    assert!(!cart.add_item(&brush, 1).await);

    // And a loosened cap admits the same add.
    mock.set_parameters(standard_parameters(10, 3, "19"));
    assert!(cart.add_item(&brush, 1).await);
}

#[tokio::test]
async fn test_cap_falls_back_to_default_during_outage() {
    let mock = mock_with_cap(10).await;
    let (store, _notifier) = storefront_over(&mock);

    let toy = product(1, "Rope toy", 4500, 20, false);

    let mut cart = store.cart().lock().await;
    mock.set_parameters_available(false);

    // Default cap of 3 applies while the parameter store is down.
    assert!(cart.add_item(&toy, 3).await);
    assert!(!cart.add_item(&toy, 1).await);
    assert_eq!(cart.today_item_count(), 3);
}

#[tokio::test]
async fn test_totals_match_reference_computation() {
    let mock = mock_with_cap(10).await;
    let (store, _notifier) = storefront_over(&mock);

    // unitPrice=10000, taxable, quantity=2, rate=0.19
    let treats = product(1, "Salmon treats", 10000, 10, true);

    let mut cart = store.cart().lock().await;
    assert!(cart.add_item(&treats, 2).await);

    assert_eq!(cart.subtotal(), Decimal::new(20000, 0));
    assert_eq!(cart.tax().await, Decimal::new(3800, 0));
    assert_eq!(cart.total().await, Decimal::new(23800, 0));
    assert_eq!(cart.total().await, cart.subtotal() + cart.tax().await);
}

#[tokio::test]
async fn test_cart_persists_across_reopen_on_disk() {
    let mock = mock_with_cap(10).await;
    let dir = tempfile::tempdir().unwrap();

    let toy = product(1, "Rope toy", 4500, 10, false);

    // First session: add and drop.
    {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir.path()));
        let notifier: Arc<dyn Notifier> = Arc::new(RecordingNotifier::new());
        let store = Storefront::with_storage(mock.config(), storage, notifier).unwrap();
        let mut cart = store.cart().lock().await;
        assert!(cart.add_item(&toy, 2).await);
    }

    // Second session over the same directory sees the same lines.
    {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(dir.path()));
        let notifier: Arc<dyn Notifier> = Arc::new(RecordingNotifier::new());
        let store = Storefront::with_storage(mock.config(), storage, notifier).unwrap();
        let cart = store.cart().lock().await;
        assert_eq!(cart.item_count(), 2);
        assert_eq!(
            cart.items().first().unwrap().description,
            "Rope toy"
        );
    }
}

#[tokio::test]
async fn test_update_and_remove_flow() {
    let mock = mock_with_cap(10).await;
    let (store, notifier) = storefront_over(&mock);

    let toy = product(1, "Rope toy", 4500, 5, false);

    let mut cart = store.cart().lock().await;
    assert!(cart.add_item(&toy, 2).await);
    let line_id = cart.items().first().unwrap().line_id;

    cart.update_quantity(line_id, 4).await;
    assert_eq!(cart.item_count(), 4);

    cart.update_quantity(line_id, 0).await;
    assert!(cart.is_empty());
    assert_eq!(cart.subtotal(), Decimal::ZERO);
    assert!(notifier.saw("removed from cart"));
}

#[tokio::test]
async fn test_engine_composes_without_full_state() {
    // The engine's collaborators are injectable on their own, matching how
    // presentation layers embed it.
    let mock = mock_with_cap(2).await;
    let config = mock.config();

    let backend = pawstore_storefront::api::BackendClient::new(&config).unwrap();
    let params = ParameterCache::new(&backend);
    let storage: Arc<dyn KeyValueStorage> =
        Arc::new(pawstore_storefront::cart::store::MemoryStorage::new());
    let notifier: Arc<dyn Notifier> = Arc::new(RecordingNotifier::new());

    let mut cart = CartEngine::open(CartStore::new(storage), params, notifier);
    assert!(cart.add_item(&product(1, "Rope toy", 4500, 9, false), 2).await);
    assert_eq!(cart.remaining_capacity_today().await, 0);
}
