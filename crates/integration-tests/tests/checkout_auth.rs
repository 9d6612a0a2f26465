//! Login, lockout, and checkout flows against the mock backend.

#![allow(clippy::unwrap_used)]

use pawstore_core::Email;
use pawstore_integration_tests::{
    MockBackend, customer, product, standard_parameters, storefront_over,
};
use pawstore_storefront::checkout::CheckoutError;
use pawstore_storefront::models::PaymentMethod;
use pawstore_storefront::session::AuthError;
use rust_decimal::Decimal;
use secrecy::SecretString;

async fn mock_with_account() -> MockBackend {
    let mock = MockBackend::spawn().await;
    mock.set_parameters(standard_parameters(10, 3, "19"));
    mock.add_account("hunter2", customer(1, "pat@example.com"));
    mock
}

fn email() -> Email {
    Email::parse("pat@example.com").unwrap()
}

#[tokio::test]
async fn test_login_success_and_whoami() {
    let mock = mock_with_account().await;
    let (store, notifier) = storefront_over(&mock);

    let mut session = store.session().lock().await;
    let account = session
        .login(&email(), SecretString::from("hunter2"))
        .await
        .unwrap();

    assert_eq!(account.email, email());
    assert!(session.is_authenticated());
    assert!(!session.is_admin());
    assert!(notifier.saw("signed in"));
}

#[tokio::test]
async fn test_login_failure_counts_attempts() {
    let mock = mock_with_account().await;
    let (store, notifier) = storefront_over(&mock);

    let mut session = store.session().lock().await;
    let err = session
        .login(&email(), SecretString::from("wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(session.failed_attempts(), 1);
    assert!(notifier.saw("attempts remaining"));
}

#[tokio::test]
async fn test_lockout_after_limit_without_backend_call() {
    let mock = mock_with_account().await;
    let (store, _notifier) = storefront_over(&mock);

    let mut session = store.session().lock().await;
    for _ in 0..3 {
        let _ = session.login(&email(), SecretString::from("wrong")).await;
    }
    assert_eq!(session.failed_attempts(), 3);

    // Even the correct password is refused once locked.
    let err = session
        .login(&email(), SecretString::from("hunter2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Locked(3)));
}

#[tokio::test]
async fn test_successful_login_resets_counter() {
    let mock = mock_with_account().await;
    let (store, _notifier) = storefront_over(&mock);

    let mut session = store.session().lock().await;
    let _ = session.login(&email(), SecretString::from("wrong")).await;
    assert_eq!(session.failed_attempts(), 1);

    session
        .login(&email(), SecretString::from("hunter2"))
        .await
        .unwrap();
    assert_eq!(session.failed_attempts(), 0);
}

#[tokio::test]
async fn test_checkout_submits_cart_and_clears_it() {
    let mock = mock_with_account().await;
    let (store, notifier) = storefront_over(&mock);

    store
        .session()
        .lock()
        .await
        .login(&email(), SecretString::from("hunter2"))
        .await
        .unwrap();

    let treats = product(1, "Salmon treats", 10000, 10, true);
    let toy = product(2, "Rope toy", 4500, 10, false);
    {
        let mut cart = store.cart().lock().await;
        assert!(cart.add_item(&treats, 2).await);
        assert!(cart.add_item(&toy, 1).await);
    }

    let summary = store.place_order(PaymentMethod::Card).await.unwrap();
    assert_eq!(summary.total, Decimal::new(28300, 0)); // 24500 + 19% of 20000

    // The backend saw exactly the cart's lines and totals.
    let orders = mock.orders();
    assert_eq!(orders.len(), 1);
    let order = orders.first().unwrap();
    assert_eq!(order.customer_email, email());
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.subtotal, Decimal::new(24500, 0));
    assert_eq!(order.tax, Decimal::new(3800, 0));
    assert_eq!(order.total, Decimal::new(28300, 0));

    // Clearing is the explicit post-submission step.
    assert!(store.cart().lock().await.is_empty());
    assert!(notifier.saw("placed"));

    // And the order shows up in history.
    let history = store.backend().customer_orders(&email()).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history.first().unwrap().id, summary.id);
}

#[tokio::test]
async fn test_checkout_requires_authentication() {
    let mock = mock_with_account().await;
    let (store, _notifier) = storefront_over(&mock);

    {
        let mut cart = store.cart().lock().await;
        assert!(cart.add_item(&product(1, "Rope toy", 4500, 10, false), 1).await);
    }

    let err = store.place_order(PaymentMethod::Card).await.unwrap_err();
    assert!(matches!(err, CheckoutError::NotAuthenticated));
    assert_eq!(store.cart().lock().await.item_count(), 1);
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart() {
    let mock = mock_with_account().await;
    let (store, _notifier) = storefront_over(&mock);

    store
        .session()
        .lock()
        .await
        .login(&email(), SecretString::from("hunter2"))
        .await
        .unwrap();

    let err = store.place_order(PaymentMethod::Card).await.unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert!(mock.orders().is_empty());
}
