//! Catalog product and category types.

use pawstore_core::{CategoryId, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product as served by the backend.
///
/// `stock_available` is a point-in-time snapshot: the cart engine validates
/// quantities against the value seen at add time, and the backend remains
/// the authority at order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub description: String,
    pub unit_price: Decimal,
    pub stock_available: u32,
    pub taxable: bool,
    pub category_id: CategoryId,
    #[serde(default)]
    pub active: bool,
}

impl Product {
    /// Unit price as a displayable [`Price`].
    #[must_use]
    pub const fn price(&self) -> Price {
        Price::from_amount(self.unit_price)
    }

    /// Whether the product can currently be added to a cart at all.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_available > 0
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new(7),
            description: "Salmon cat treats".to_string(),
            unit_price: Decimal::new(10000, 0),
            stock_available: 12,
            taxable: true,
            category_id: CategoryId::new(2),
            active: true,
        }
    }

    #[test]
    fn test_wire_shape_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["unitPrice"], "10000");
        assert_eq!(json["stockAvailable"], 12);
        assert_eq!(json["categoryId"], 2);
    }

    #[test]
    fn test_in_stock() {
        let mut product = sample();
        assert!(product.in_stock());
        product.stock_available = 0;
        assert!(!product.in_stock());
    }

    #[test]
    fn test_price_display() {
        assert_eq!(sample().price().display(), "$10000.00");
    }
}
