//! REST client for the retailer backend.
//!
//! The backend owns all durable state; this client is read-mostly (catalog,
//! parameters, order history) plus two writes (login, order submission).
//! Catalog reads are cached with `moka` (5-minute TTL). Parameter reads are
//! never cached; see [`crate::params`] for why.

mod cache;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use pawstore_core::{Email, ProductId};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::StorefrontConfig;
use crate::models::{Category, OrderRequest, OrderSummary, ParameterRecord, Product, UserAccount};

use cache::CacheValue;

/// Catalog cache time-to-live.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when talking to the retailer backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Login rejected by the backend.
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Client for the retailer's REST API.
///
/// Cheaply cloneable via `Arc`; one instance is shared across the cart
/// engine, parameter cache, and session holder.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        let base_url = config.api_base_url.as_str().trim_end_matches('/').to_string();

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url,
                cache,
            }),
        })
    }

    /// Execute a GET request and decode the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        Self::decode(response, path).await
    }

    /// Execute a POST request with a JSON body and decode the JSON response.
    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.post(&url).json(body).send().await?;
        Self::decode(response, path).await
    }

    /// Map status codes and parse the response body.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                path,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Fetch the full system parameter collection. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// parsed; callers in the parameter cache degrade to defaults.
    #[instrument(skip(self))]
    pub async fn fetch_parameters(&self) -> Result<Vec<ParameterRecord>, ApiError> {
        self.get_json("/parameters").await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List products currently available for sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn available_products(&self) -> Result<Vec<Product>, ApiError> {
        let cache_key = "products:available".to_string();

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for available products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("/products/available").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for unknown IDs, or another error if
    /// the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("/products/{id}")).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// List product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get_json("/categories").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Authenticate against the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidCredentials`] when the backend rejects the
    /// credentials (401/403), or another error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<UserAccount, ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };

        match self.post_json("/auth/login", &body).await {
            Err(ApiError::Api { status: 401 | 403, .. }) => Err(ApiError::InvalidCredentials),
            other => other,
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order or the request
    /// fails; the caller's cart is left untouched in that case.
    #[instrument(skip(self, order), fields(lines = order.lines.len()))]
    pub async fn submit_order(&self, order: &OrderRequest) -> Result<OrderSummary, ApiError> {
        self.post_json("/orders", order).await
    }

    /// Order history for a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn customer_orders(&self, email: &Email) -> Result<Vec<OrderSummary>, ApiError> {
        self.get_json(&format!("/orders/customer/{}", email.as_str()))
            .await
    }
}

#[async_trait::async_trait]
impl crate::params::ParameterSource for BackendClient {
    async fn fetch_parameters(&self) -> Result<Vec<ParameterRecord>, ApiError> {
        self.get_json("/parameters").await
    }
}
