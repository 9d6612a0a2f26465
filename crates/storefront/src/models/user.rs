//! Account types as reported by the backend.

use pawstore_core::{AccountStatus, Email, UserId, UserRole};
use serde::{Deserialize, Serialize};

/// The authenticated account for a session.
///
/// The backend owns all account state; this is a read-only snapshot taken
/// at login and persisted locally so a session survives restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,
    pub email: Email,
    #[serde(default)]
    pub name: Option<String>,
    pub role: UserRole,
    pub status: AccountStatus,
}

impl UserAccount {
    /// Whether the account is allowed to act (disabled accounts keep their
    /// stored session data but fail this check).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let account = UserAccount {
            id: UserId::new(9),
            email: Email::parse("pat@example.com").unwrap(),
            name: Some("Pat".to_string()),
            role: UserRole::Customer,
            status: AccountStatus::Active,
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["email"], "pat@example.com");
        assert_eq!(json["role"], "customer");
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn test_is_active() {
        let mut account: UserAccount = serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "pat@example.com",
            "role": "admin",
            "status": "active",
        }))
        .unwrap();
        assert!(account.is_active());
        account.status = AccountStatus::Inactive;
        assert!(!account.is_active());
    }
}
