//! Authentication session holder.
//!
//! Tracks the logged-in identity and role, persisted locally so a session
//! survives restarts. Credential verification is entirely the backend's
//! job; this holder only stores the reported account and gates repeated
//! failures using the server-configured login-attempt limit.

use std::sync::Arc;

use pawstore_core::{Email, UserRole};
use secrecy::SecretString;
use thiserror::Error;
use tracing::warn;

use crate::api::{ApiError, BackendClient};
use crate::cart::store::KeyValueStorage;
use crate::models::UserAccount;
use crate::notify::{Notifier, Severity};
use crate::params::ParameterCache;

/// Storage key the persisted account lives under.
const USER_KEY: &str = "user";

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Backend rejected the credentials.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Too many consecutive failures this session.
    #[error("locked after {0} failed login attempts")]
    Locked(u32),

    /// The login request itself failed.
    #[error("login failed: {0}")]
    Api(#[from] ApiError),
}

/// Holder for the authenticated session.
pub struct AuthSession {
    storage: Arc<dyn KeyValueStorage>,
    backend: BackendClient,
    params: ParameterCache,
    notifier: Arc<dyn Notifier>,
    user: Option<UserAccount>,
    failed_attempts: u32,
}

impl AuthSession {
    /// Restore a session, loading any persisted account.
    ///
    /// Corrupt persisted data is discarded and the storage key cleared.
    #[must_use]
    pub fn restore(
        storage: Arc<dyn KeyValueStorage>,
        backend: BackendClient,
        params: ParameterCache,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let user = storage.get(USER_KEY).and_then(|raw| {
            serde_json::from_str::<UserAccount>(&raw).map_or_else(
                |e| {
                    warn!(error = %e, "Discarding corrupt persisted session");
                    if let Err(e) = storage.remove(USER_KEY) {
                        warn!(error = %e, "Failed to clear corrupt session");
                    }
                    None
                },
                Some,
            )
        });

        Self {
            storage,
            backend,
            params,
            notifier,
            user,
            failed_attempts: 0,
        }
    }

    /// Authenticate against the backend and persist the account.
    ///
    /// Once consecutive failures reach the (re-fetched) login-attempt
    /// limit, further attempts are refused without contacting the backend.
    /// Transport failures do not count toward the limit.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Locked`] when the attempt limit is reached,
    /// [`AuthError::InvalidCredentials`] on rejection, or
    /// [`AuthError::Api`] when the request itself fails.
    pub async fn login(
        &mut self,
        email: &Email,
        password: SecretString,
    ) -> Result<UserAccount, AuthError> {
        let limit = self.params.max_login_attempts().await;

        if self.failed_attempts >= limit {
            self.notifier.notify(
                Severity::Error,
                &format!("Account locked after {limit} failed attempts"),
            );
            return Err(AuthError::Locked(limit));
        }

        match self.backend.login(email, &password).await {
            Ok(account) => {
                self.failed_attempts = 0;
                self.persist(&account);
                self.user = Some(account.clone());
                self.notifier
                    .notify(Severity::Success, "Welcome! You are signed in");
                Ok(account)
            }
            Err(ApiError::InvalidCredentials) => {
                self.failed_attempts += 1;
                let remaining = limit.saturating_sub(self.failed_attempts);
                self.notifier.notify(
                    Severity::Error,
                    &format!("Invalid email or password ({remaining} attempts remaining)"),
                );
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => {
                self.notifier
                    .notify(Severity::Error, "Could not sign in, try again later");
                Err(AuthError::Api(e))
            }
        }
    }

    /// Clear the session, in memory and in storage.
    pub fn logout(&mut self) {
        self.user = None;
        if let Err(e) = self.storage.remove(USER_KEY) {
            warn!(error = %e, "Failed to clear persisted session");
        }
        self.notifier.notify(Severity::Info, "Signed out");
    }

    /// The current account, authenticated or not.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserAccount> {
        self.user.as_ref()
    }

    /// Whether an active account is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.as_ref().is_some_and(UserAccount::is_active)
    }

    /// Whether the signed-in account has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.role == UserRole::Admin)
    }

    /// Consecutive failed login attempts this session.
    #[must_use]
    pub const fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    fn persist(&self, account: &UserAccount) {
        match serde_json::to_string(account) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(USER_KEY, &raw) {
                    warn!(error = %e, "Failed to persist session");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize session"),
        }
    }
}
