//! System parameter records from the backend's configuration store.

use pawstore_core::ParameterId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Well-known parameter IDs, used as a fallback when description matching
/// fails (e.g., an admin reworded the entry).
pub const PARAM_ID_DAILY_LIMIT: ParameterId = ParameterId::new(1);
pub const PARAM_ID_LOGIN_ATTEMPTS: ParameterId = ParameterId::new(2);
pub const PARAM_ID_TAX_RATE: ParameterId = ParameterId::new(3);

/// One entry of the backend's parameter collection.
///
/// Entries carry both a numeric and a text value; which one is meaningful
/// depends on the parameter (the tax rate historically lives in the text
/// value as a percentage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRecord {
    pub id: ParameterId,
    pub description: String,
    #[serde(default)]
    pub numeric_value: Option<Decimal>,
    #[serde(default)]
    pub text_value: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let record: ParameterRecord = serde_json::from_value(serde_json::json!({
            "id": 1,
            "description": "Maximum items per day",
            "numericValue": "3",
        }))
        .unwrap();
        assert_eq!(record.id, PARAM_ID_DAILY_LIMIT);
        assert_eq!(record.numeric_value, Some(Decimal::new(3, 0)));
        assert_eq!(record.text_value, None);
    }
}
