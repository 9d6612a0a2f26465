//! Integration tests for Pawstore.
//!
//! The harness spins up an in-process mock of the retailer's REST backend
//! (axum on an ephemeral port) and points the real storefront client at it,
//! so the whole stack (HTTP client, parameter cache, cart engine,
//! persistence, session) is exercised end to end without any environment
//! setup.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pawstore-integration-tests
//! ```

// Test harness: panicking on broken fixtures is the correct failure mode.
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use pawstore_core::{
    AccountStatus, CategoryId, Email, OrderId, OrderStatus, ProductId, UserId, UserRole,
};
use pawstore_storefront::cart::store::MemoryStorage;
use pawstore_storefront::config::StorefrontConfig;
use pawstore_storefront::models::{
    Category, OrderRequest, OrderSummary, ParameterRecord, Product, UserAccount,
};
use pawstore_storefront::notify::RecordingNotifier;
use pawstore_storefront::state::Storefront;
use rust_decimal::Decimal;
use serde_json::Value;
use url::Url;

/// Shared mutable state behind the mock backend.
pub struct MockState {
    parameters: Mutex<Vec<ParameterRecord>>,
    parameters_available: AtomicBool,
    products: Mutex<Vec<Product>>,
    categories: Mutex<Vec<Category>>,
    accounts: Mutex<Vec<(String, String, UserAccount)>>,
    orders: Mutex<Vec<(OrderRequest, OrderSummary)>>,
    next_order_id: AtomicI32,
}

/// An in-process mock of the retailer backend.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Start the mock on an ephemeral port with empty state.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState {
            parameters: Mutex::new(Vec::new()),
            parameters_available: AtomicBool::new(true),
            products: Mutex::new(Vec::new()),
            categories: Mutex::new(Vec::new()),
            accounts: Mutex::new(Vec::new()),
            orders: Mutex::new(Vec::new()),
            next_order_id: AtomicI32::new(1),
        });

        let app = Router::new()
            .route("/parameters", get(get_parameters))
            .route("/products/available", get(get_available_products))
            .route("/products/{id}", get(get_product))
            .route("/categories", get(get_categories))
            .route("/auth/login", post(post_login))
            .route("/orders", post(post_order))
            .route("/orders/customer/{email}", get(get_customer_orders))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Base URL of the running mock.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A storefront configuration pointing at this mock.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            api_base_url: Url::parse(&self.base_url()).unwrap(),
            data_dir: std::env::temp_dir(),
            request_timeout: Duration::from_secs(2),
        }
    }

    /// Replace the served parameter collection.
    pub fn set_parameters(&self, parameters: Vec<ParameterRecord>) {
        *self.state.parameters.lock().unwrap() = parameters;
    }

    /// Toggle a simulated parameter-store outage (503 on fetch).
    pub fn set_parameters_available(&self, available: bool) {
        self.state
            .parameters_available
            .store(available, Ordering::SeqCst);
    }

    /// Add a catalog product, replacing any existing one with the same ID.
    pub fn add_product(&self, product: Product) {
        let mut products = self.state.products.lock().unwrap();
        products.retain(|p| p.id != product.id);
        products.push(product);
    }

    /// Add a category.
    pub fn add_category(&self, category: Category) {
        self.state.categories.lock().unwrap().push(category);
    }

    /// Register an account with its password.
    pub fn add_account(&self, password: &str, account: UserAccount) {
        self.state.accounts.lock().unwrap().push((
            account.email.as_str().to_string(),
            password.to_string(),
            account,
        ));
    }

    /// Orders received so far.
    #[must_use]
    pub fn orders(&self) -> Vec<OrderRequest> {
        self.state
            .orders
            .lock()
            .unwrap()
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn get_parameters(State(state): State<Arc<MockState>>) -> Response {
    if !state.parameters_available.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    Json(state.parameters.lock().unwrap().clone()).into_response()
}

async fn get_available_products(State(state): State<Arc<MockState>>) -> Json<Vec<Product>> {
    Json(state.products.lock().unwrap().clone())
}

async fn get_product(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i32>,
) -> Response {
    let id = ProductId::new(id);
    let product = state
        .products
        .lock()
        .unwrap()
        .iter()
        .find(|p| p.id == id)
        .cloned();
    match product {
        Some(product) => Json(product).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_categories(State(state): State<Arc<MockState>>) -> Json<Vec<Category>> {
    Json(state.categories.lock().unwrap().clone())
}

async fn post_login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let account = state
        .accounts
        .lock()
        .unwrap()
        .iter()
        .find(|(e, p, _)| e == email && p == password)
        .map(|(_, _, account)| account.clone());

    match account {
        Some(account) => Json(account).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn post_order(
    State(state): State<Arc<MockState>>,
    Json(request): Json<OrderRequest>,
) -> Json<OrderSummary> {
    let summary = OrderSummary {
        id: OrderId::new(state.next_order_id.fetch_add(1, Ordering::SeqCst)),
        status: OrderStatus::Received,
        total: request.total,
        placed_at: Utc::now(),
    };
    state
        .orders
        .lock()
        .unwrap()
        .push((request, summary.clone()));
    Json(summary)
}

async fn get_customer_orders(
    State(state): State<Arc<MockState>>,
    Path(email): Path<String>,
) -> Json<Vec<OrderSummary>> {
    Json(
        state
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|(request, _)| request.customer_email.as_str() == email)
            .map(|(_, summary)| summary.clone())
            .collect(),
    )
}

// =============================================================================
// Fixtures
// =============================================================================

/// The stock parameter collection most tests start from.
#[must_use]
pub fn standard_parameters(daily_cap: i64, login_attempts: i64, tax_percent: &str) -> Vec<ParameterRecord> {
    vec![
        ParameterRecord {
            id: pawstore_core::ParameterId::new(1),
            description: "Maximum items per day".to_string(),
            numeric_value: Some(Decimal::from(daily_cap)),
            text_value: None,
        },
        ParameterRecord {
            id: pawstore_core::ParameterId::new(2),
            description: "Maximum failed login attempts".to_string(),
            numeric_value: Some(Decimal::from(login_attempts)),
            text_value: None,
        },
        ParameterRecord {
            id: pawstore_core::ParameterId::new(3),
            description: "Sales tax percentage".to_string(),
            numeric_value: None,
            text_value: Some(tax_percent.to_string()),
        },
    ]
}

/// A catalog product fixture.
#[must_use]
pub fn product(id: i32, description: &str, price: i64, stock: u32, taxable: bool) -> Product {
    Product {
        id: ProductId::new(id),
        description: description.to_string(),
        unit_price: Decimal::new(price, 0),
        stock_available: stock,
        taxable,
        category_id: CategoryId::new(1),
        active: true,
    }
}

/// An active customer account fixture.
#[must_use]
pub fn customer(id: i32, email: &str) -> UserAccount {
    UserAccount {
        id: UserId::new(id),
        email: Email::parse(email).unwrap(),
        name: None,
        role: UserRole::Customer,
        status: AccountStatus::Active,
    }
}

/// A full storefront wired to the mock, with in-memory persistence and a
/// recording notifier.
pub fn storefront_over(mock: &MockBackend) -> (Storefront, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let sink: Arc<dyn pawstore_storefront::notify::Notifier> = notifier.clone();
    let storefront =
        Storefront::with_storage(mock.config(), Arc::new(MemoryStorage::new()), sink).unwrap();
    (storefront, notifier)
}
