//! System parameter cache with hardcoded fallbacks.
//!
//! Three tunable business limits live in the backend's parameter store: the
//! daily item cap, the login-attempt threshold, and the tax rate. Each read
//! fetches the full collection, resolves the entry by keyword (falling back
//! to a well-known ID), and parses its value. Every failure mode (network,
//! missing entry, unparsable value) degrades to the hardcoded default and
//! logs a warning; callers never see an error.
//!
//! There is no client-side expiry: admins can change the cap between two
//! cart actions, so cap-sensitive mutations re-fetch immediately before
//! validating. The tax rate is the one session-stable read
//! ([`ParameterCache::session_tax_rate`]): totals shown during a session
//! must not drift between renders.

use std::sync::Arc;

use async_trait::async_trait;
use pawstore_core::ParameterId;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tokio::sync::OnceCell;
use tracing::warn;

use crate::api::{ApiError, BackendClient};
use crate::models::parameter::{
    PARAM_ID_DAILY_LIMIT, PARAM_ID_LOGIN_ATTEMPTS, PARAM_ID_TAX_RATE, ParameterRecord,
};

/// Fallback: maximum items a customer may add per calendar day.
pub const DEFAULT_MAX_DAILY_ITEMS: u32 = 3;

/// Fallback: consecutive failed logins before the session locks.
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Fallback tax rate as a fraction (19%).
#[must_use]
pub fn default_tax_rate() -> Decimal {
    Decimal::new(19, 2)
}

/// Keyword matched (case-insensitively) against parameter descriptions.
const KEYWORD_DAILY_LIMIT: &str = "items per day";
const KEYWORD_LOGIN_ATTEMPTS: &str = "login attempts";
const KEYWORD_TAX_RATE: &str = "tax";

/// Read-only source of the parameter collection.
///
/// Implemented by [`BackendClient`]; tests substitute in-memory sources.
#[async_trait]
pub trait ParameterSource: Send + Sync {
    /// Fetch the full parameter collection.
    async fn fetch_parameters(&self) -> Result<Vec<ParameterRecord>, ApiError>;
}

/// Process-wide cache of system parameters.
///
/// Cheaply cloneable; all consumers share one instance. Only the fetch
/// methods touch the source; there is no write access.
#[derive(Clone)]
pub struct ParameterCache {
    inner: Arc<ParameterCacheInner>,
}

struct ParameterCacheInner {
    source: Arc<dyn ParameterSource>,
    session_tax_rate: OnceCell<Decimal>,
}

impl ParameterCache {
    /// Create a cache backed by the real backend client.
    #[must_use]
    pub fn new(backend: &BackendClient) -> Self {
        Self::with_source(Arc::new(backend.clone()))
    }

    /// Create a cache backed by an arbitrary source.
    #[must_use]
    pub fn with_source(source: Arc<dyn ParameterSource>) -> Self {
        Self {
            inner: Arc::new(ParameterCacheInner {
                source,
                session_tax_rate: OnceCell::new(),
            }),
        }
    }

    /// Maximum total quantity a customer may add per calendar day.
    ///
    /// Re-fetches on every call so a server-side change is honored by the
    /// very next cap-sensitive mutation.
    pub async fn max_daily_items(&self) -> u32 {
        self.numeric_parameter(
            KEYWORD_DAILY_LIMIT,
            PARAM_ID_DAILY_LIMIT,
            DEFAULT_MAX_DAILY_ITEMS,
        )
        .await
    }

    /// Consecutive failed logins before further attempts are refused.
    pub async fn max_login_attempts(&self) -> u32 {
        self.numeric_parameter(
            KEYWORD_LOGIN_ATTEMPTS,
            PARAM_ID_LOGIN_ATTEMPTS,
            DEFAULT_MAX_LOGIN_ATTEMPTS,
        )
        .await
    }

    /// Current tax rate as a fraction (server stores a percentage).
    pub async fn tax_rate(&self) -> Decimal {
        match self.inner.source.fetch_parameters().await {
            Ok(records) => resolve_tax_rate(&records).unwrap_or_else(|| {
                warn!("Tax rate parameter missing or unparsable, using default");
                default_tax_rate()
            }),
            Err(e) => {
                warn!(error = %e, "Failed to fetch parameters, using default tax rate");
                default_tax_rate()
            }
        }
    }

    /// Tax rate pinned to its first read for the rest of the session.
    ///
    /// Cart totals use this so a mid-session admin change cannot make the
    /// displayed tax jump between two renders of the same cart.
    pub async fn session_tax_rate(&self) -> Decimal {
        *self
            .inner
            .session_tax_rate
            .get_or_init(|| self.tax_rate())
            .await
    }

    async fn numeric_parameter(
        &self,
        keyword: &str,
        well_known: ParameterId,
        default: u32,
    ) -> u32 {
        match self.inner.source.fetch_parameters().await {
            Ok(records) => {
                resolve_numeric(&records, keyword, well_known).unwrap_or_else(|| {
                    warn!(keyword, "Parameter missing or unparsable, using default");
                    default
                })
            }
            Err(e) => {
                warn!(keyword, error = %e, "Failed to fetch parameters, using default");
                default
            }
        }
    }
}

/// Locate an entry by keyword substring or well-known ID.
fn find_parameter<'a>(
    records: &'a [ParameterRecord],
    keyword: &str,
    well_known: ParameterId,
) -> Option<&'a ParameterRecord> {
    records
        .iter()
        .find(|p| p.description.to_lowercase().contains(keyword) || p.id == well_known)
}

/// Resolve a positive integer parameter.
fn resolve_numeric(
    records: &[ParameterRecord],
    keyword: &str,
    well_known: ParameterId,
) -> Option<u32> {
    find_parameter(records, keyword, well_known)
        .and_then(|p| p.numeric_value)
        .and_then(|d| d.to_u32())
        .filter(|v| *v >= 1)
}

/// Resolve the tax rate: percentage from the text value (numeric value as a
/// fallback), divided by 100.
fn resolve_tax_rate(records: &[ParameterRecord]) -> Option<Decimal> {
    let record = find_parameter(records, KEYWORD_TAX_RATE, PARAM_ID_TAX_RATE)?;
    let percentage = record
        .text_value
        .as_deref()
        .and_then(|s| s.trim().parse::<Decimal>().ok())
        .or(record.numeric_value)?;
    if percentage < Decimal::ZERO {
        return None;
    }
    Some(percentage / Decimal::from(100))
}
