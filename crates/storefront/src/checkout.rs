//! Checkout: submit the cart as an order, then clear it.
//!
//! The cart engine does not know about orders; clearing the cart after a
//! successful submission is this module's explicit, separate step. A failed
//! submission leaves the cart exactly as it was.

use thiserror::Error;

use crate::api::{ApiError, BackendClient};
use crate::cart::CartEngine;
use crate::models::{OrderLine, OrderRequest, OrderSummary, PaymentMethod};
use crate::notify::{Notifier, Severity};
use crate::session::AuthSession;

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No active signed-in account.
    #[error("sign in to place an order")]
    NotAuthenticated,

    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The backend rejected the order or the request failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Place an order from the current cart.
///
/// Snapshots the cart's lines and totals into an [`OrderRequest`], submits
/// it, and clears the cart on success.
///
/// # Errors
///
/// Returns [`CheckoutError::NotAuthenticated`] without an active session,
/// [`CheckoutError::EmptyCart`] for an empty cart, or the wrapped
/// [`ApiError`] when submission fails (cart untouched).
pub async fn place_order(
    cart: &mut CartEngine,
    session: &AuthSession,
    backend: &BackendClient,
    notifier: &dyn Notifier,
    payment: PaymentMethod,
) -> Result<OrderSummary, CheckoutError> {
    if !session.is_authenticated() {
        return Err(CheckoutError::NotAuthenticated);
    }
    let Some(user) = session.current_user() else {
        return Err(CheckoutError::NotAuthenticated);
    };

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let subtotal = cart.subtotal();
    let tax = cart.tax().await;
    let request = OrderRequest {
        customer_email: user.email.clone(),
        lines: cart.items().iter().map(OrderLine::from).collect(),
        payment,
        subtotal,
        tax,
        total: subtotal + tax,
    };

    let summary = backend.submit_order(&request).await?;

    cart.remove_all();
    notifier.notify(
        Severity::Success,
        &format!("Order #{} placed, total {}", summary.id, summary.total),
    );

    Ok(summary)
}
