//! Order submission and history types.

use chrono::{DateTime, Utc};
use pawstore_core::{Email, OrderId, OrderStatus, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLineItem;

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::BankTransfer => write!(f, "bank_transfer"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "bank_transfer" => Ok(Self::BankTransfer),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// One ordered product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl From<&CartLineItem> for OrderLine {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product_id,
            description: line.description.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// A complete order as submitted to the backend.
///
/// Totals are computed client-side from the cart snapshot; the backend
/// re-validates them against its own inventory and parameter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_email: Email,
    pub lines: Vec<OrderLine>,
    pub payment: PaymentMethod,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// A stored order, as returned on submission and in order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_parse() {
        let method: PaymentMethod = "bank_transfer".parse().unwrap();
        assert_eq!(method, PaymentMethod::BankTransfer);
        assert_eq!(method.to_string(), "bank_transfer");
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_order_line_from_cart_line() {
        let product = crate::models::Product {
            id: ProductId::new(4),
            description: "Dog shampoo".to_string(),
            unit_price: Decimal::new(12000, 0),
            stock_available: 8,
            taxable: true,
            category_id: pawstore_core::CategoryId::new(3),
            active: true,
        };
        let cart_line = CartLineItem::new(&product, 2);
        let order_line = OrderLine::from(&cart_line);
        assert_eq!(order_line.product_id, product.id);
        assert_eq!(order_line.quantity, 2);
        assert_eq!(order_line.unit_price, product.unit_price);
    }
}
