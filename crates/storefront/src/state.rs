//! Application state shared across consumers.
//!
//! One owned store object replaces the original's globally shared mutable
//! cart: consumers receive a [`Storefront`] and go through its accessors.
//! The mutable line list itself is never exposed.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::api::{ApiError, BackendClient};
use crate::cart::CartEngine;
use crate::cart::store::{CartStore, FileStorage, KeyValueStorage};
use crate::checkout::{self, CheckoutError};
use crate::config::StorefrontConfig;
use crate::models::{OrderSummary, PaymentMethod};
use crate::notify::Notifier;
use crate::params::ParameterCache;
use crate::session::AuthSession;

/// Storefront state shared across all consumers.
///
/// Cheaply cloneable via `Arc`. The cart and session sit behind async
/// mutexes so every operation completes its read-validate-mutate-persist
/// sequence exclusively, even across the parameter-fetch suspension points.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    backend: BackendClient,
    params: ParameterCache,
    notifier: Arc<dyn Notifier>,
    cart: Mutex<CartEngine>,
    session: Mutex<AuthSession>,
}

impl Storefront {
    /// Create the storefront state with file-backed local persistence under
    /// the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: StorefrontConfig, notifier: Arc<dyn Notifier>) -> Result<Self, ApiError> {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(&config.data_dir));
        Self::with_storage(config, storage, notifier)
    }

    /// Create the storefront state over an arbitrary storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn KeyValueStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let backend = BackendClient::new(&config)?;
        let params = ParameterCache::new(&backend);

        let cart = CartEngine::open(
            CartStore::new(Arc::clone(&storage)),
            params.clone(),
            Arc::clone(&notifier),
        );
        let session = AuthSession::restore(
            storage,
            backend.clone(),
            params.clone(),
            Arc::clone(&notifier),
        );

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                backend,
                params,
                notifier,
                cart: Mutex::new(cart),
                session: Mutex::new(session),
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the system parameter cache.
    #[must_use]
    pub fn params(&self) -> &ParameterCache {
        &self.inner.params
    }

    /// Get a reference to the notification sink.
    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.inner.notifier
    }

    /// Get the cart engine.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartEngine> {
        &self.inner.cart
    }

    /// Get the auth session holder.
    #[must_use]
    pub fn session(&self) -> &Mutex<AuthSession> {
        &self.inner.session
    }

    /// Place an order from the current cart (see [`checkout::place_order`]).
    ///
    /// Locks the session, then the cart, always in that order.
    ///
    /// # Errors
    ///
    /// See [`checkout::place_order`].
    pub async fn place_order(&self, payment: PaymentMethod) -> Result<OrderSummary, CheckoutError> {
        let session = self.inner.session.lock().await;
        let mut cart = self.inner.cart.lock().await;
        checkout::place_order(
            &mut cart,
            &session,
            &self.inner.backend,
            self.inner.notifier.as_ref(),
            payment,
        )
        .await
    }
}
