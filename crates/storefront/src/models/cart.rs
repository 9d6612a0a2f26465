//! Cart line item type.

use chrono::{DateTime, Local, NaiveDate, Utc};
use pawstore_core::{LineId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::Product;

/// One entry in the cart: one product at one quantity added at one point in
/// time.
///
/// `line_id` identifies the addition; `product_id` identifies the product.
/// Merging a repeated product keeps the original line (and its `added_at`),
/// so daily-cap accounting can still attribute quantities to the day the
/// line was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub line_id: LineId,
    pub product_id: ProductId,
    pub description: String,
    pub unit_price: Decimal,
    /// Stock snapshot taken when the line was created.
    pub stock_available: u32,
    pub taxable: bool,
    pub quantity: u32,
    /// Set once at creation; never updated, even on merge.
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Create a fresh line for `product`, added now.
    #[must_use]
    pub fn new(product: &Product, quantity: u32) -> Self {
        Self {
            line_id: LineId::generate(),
            product_id: product.id,
            description: product.description.clone(),
            unit_price: product.unit_price,
            stock_available: product.stock_available,
            taxable: product.taxable,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Extended price for the line (`unit_price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Whether this line was added on the given local calendar date.
    #[must_use]
    pub fn added_on(&self, day: NaiveDate) -> bool {
        self.added_at.with_timezone(&Local).date_naive() == day
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use pawstore_core::CategoryId;

    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            description: "Chew toy".to_string(),
            unit_price: Decimal::new(4500, 0),
            stock_available: 5,
            taxable: false,
            category_id: CategoryId::new(1),
            active: true,
        }
    }

    #[test]
    fn test_new_snapshots_product() {
        let product = sample_product();
        let line = CartLineItem::new(&product, 2);
        assert_eq!(line.product_id, product.id);
        assert_eq!(line.unit_price, product.unit_price);
        assert_eq!(line.stock_available, 5);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_line_total() {
        let line = CartLineItem::new(&sample_product(), 3);
        assert_eq!(line.line_total(), Decimal::new(13500, 0));
    }

    #[test]
    fn test_added_on_buckets_by_local_day() {
        let today = Local::now().date_naive();
        let mut line = CartLineItem::new(&sample_product(), 1);
        assert!(line.added_on(today));

        line.added_at -= Duration::days(1);
        assert!(!line.added_on(today));
    }

    #[test]
    fn test_serde_roundtrip() {
        let line = CartLineItem::new(&sample_product(), 2);
        let json = serde_json::to_string(&line).unwrap();
        let back: CartLineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }
}
