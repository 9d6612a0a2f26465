//! Cart engine: line-item mutations, daily-cap enforcement, and totals.
//!
//! The engine owns the in-memory line list exclusively and persists it
//! write-through after every mutation. The daily cap is re-fetched from the
//! parameter cache immediately before each cap-sensitive mutation
//! (refresh-then-validate): the cap is server-configured and can change
//! between two cart actions, so a stale value must never admit an add the
//! current cap would reject.
//!
//! Day buckets use the *local* calendar date of the moment a line was
//! created. Merging a repeated product keeps the original line's `added_at`,
//! so the merged quantity stays attributed to the original day afterwards,
//! while the merge itself still validates in full against today's cap.

pub mod store;

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use pawstore_core::LineId;
use rust_decimal::Decimal;

use crate::models::{CartLineItem, Product};
use crate::notify::{Notifier, Severity};
use crate::params::ParameterCache;

use store::CartStore;

/// The cart's business logic layer.
///
/// All validation failures are local: the operation reports `false` or
/// no-ops, emits one user-facing notification, and leaves both memory and
/// storage untouched. Nothing here is fatal.
pub struct CartEngine {
    items: Vec<CartLineItem>,
    store: CartStore,
    params: ParameterCache,
    notifier: Arc<dyn Notifier>,
}

impl CartEngine {
    /// Open the cart, loading any previously persisted lines.
    #[must_use]
    pub fn open(store: CartStore, params: ParameterCache, notifier: Arc<dyn Notifier>) -> Self {
        let items = store.load();
        Self {
            items,
            store,
            params,
            notifier,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `product` to the cart.
    ///
    /// Validates, in order: the re-fetched daily cap, the product's stock
    /// snapshot, and (when merging into an existing line for the same
    /// product) both again at the merged quantity, with today's total
    /// counted without the line's prior same-day contribution. Returns
    /// `false` with no mutation on any rejection.
    pub async fn add_item(&mut self, product: &Product, quantity: u32) -> bool {
        if quantity == 0 {
            self.notifier
                .notify(Severity::Error, "Quantity must be at least 1");
            return false;
        }

        let cap = self.params.max_daily_items().await;
        let today = Local::now().date_naive();
        let today_count = self.quantity_added_on(today);

        if u64::from(today_count) + u64::from(quantity) > u64::from(cap) {
            self.notifier.notify(
                Severity::Error,
                &format!("You can only add {cap} items per day"),
            );
            return false;
        }

        if quantity > product.stock_available {
            self.notifier
                .notify(Severity::Error, "Not enough stock available");
            return false;
        }

        let existing = self
            .items
            .iter()
            .position(|line| line.product_id == product.id);

        if let Some(pos) = existing {
            let (new_quantity, prior_today) = match self.items.get(pos) {
                Some(line) => (
                    line.quantity + quantity,
                    if line.added_on(today) { line.quantity } else { 0 },
                ),
                None => return false,
            };

            if new_quantity > product.stock_available {
                self.notifier
                    .notify(Severity::Error, "Not enough stock available");
                return false;
            }

            if u64::from(today_count - prior_today) + u64::from(new_quantity) > u64::from(cap) {
                self.notifier.notify(
                    Severity::Error,
                    &format!("You can only add {cap} items per day"),
                );
                return false;
            }

            // added_at stays with the original line: the merged quantity
            // keeps its original day bucket.
            if let Some(line) = self.items.get_mut(pos) {
                line.quantity = new_quantity;
            }
        } else {
            self.items.push(CartLineItem::new(product, quantity));
        }

        self.persist();
        self.notifier.notify(
            Severity::Success,
            &format!("{} added to cart", product.description),
        );
        true
    }

    /// Remove the line with `line_id`. Silent no-op if absent.
    pub fn remove_item(&mut self, line_id: LineId) {
        let removed = self
            .items
            .iter()
            .position(|line| line.line_id == line_id)
            .map(|pos| self.items.remove(pos));

        self.persist();

        if let Some(line) = removed {
            self.notifier.notify(
                Severity::Info,
                &format!("{} removed from cart", line.description),
            );
        }
    }

    /// Set the quantity of the line with `line_id`.
    ///
    /// A quantity of 0 removes the line. An unknown `line_id` is a silent
    /// no-op. Stock and the re-fetched daily cap (today's total counted
    /// without this line) are validated before mutating.
    pub async fn update_quantity(&mut self, line_id: LineId, new_quantity: u32) {
        if new_quantity == 0 {
            self.remove_item(line_id);
            return;
        }

        let Some(pos) = self.items.iter().position(|line| line.line_id == line_id) else {
            return;
        };

        let today = Local::now().date_naive();
        let (stock, prior_today) = match self.items.get(pos) {
            Some(line) => (
                line.stock_available,
                if line.added_on(today) { line.quantity } else { 0 },
            ),
            None => return,
        };

        if new_quantity > stock {
            self.notifier
                .notify(Severity::Error, "Not enough stock available");
            return;
        }

        let cap = self.params.max_daily_items().await;
        let today_without_line = self.quantity_added_on(today) - prior_today;

        if u64::from(today_without_line) + u64::from(new_quantity) > u64::from(cap) {
            self.notifier.notify(
                Severity::Error,
                &format!("You can only add {cap} items per day"),
            );
            return;
        }

        if let Some(line) = self.items.get_mut(pos) {
            line.quantity = new_quantity;
        }
        self.persist();
    }

    /// Clear all lines.
    pub fn remove_all(&mut self) {
        self.items.clear();
        self.persist();
        self.notifier.notify(Severity::Info, "Cart emptied");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of `unit_price × quantity` over all lines. Exact decimal math.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Tax over the taxable lines, at the session-stable tax rate.
    pub async fn tax(&self) -> Decimal {
        let rate = self.params.session_tax_rate().await;
        self.items
            .iter()
            .filter(|line| line.taxable)
            .map(|line| line.line_total() * rate)
            .sum()
    }

    /// Grand total: `subtotal() + tax()`.
    pub async fn total(&self) -> Decimal {
        self.subtotal() + self.tax().await
    }

    /// Sum of quantities for lines added on the current local calendar date.
    #[must_use]
    pub fn today_item_count(&self) -> u32 {
        self.quantity_added_on(Local::now().date_naive())
    }

    /// Re-fetched daily cap minus today's count.
    ///
    /// May be negative when the cap shrank after items were added; callers
    /// clamp for display.
    pub async fn remaining_capacity_today(&self) -> i64 {
        let cap = self.params.max_daily_items().await;
        i64::from(cap) - i64::from(self.today_item_count())
    }

    /// Read-only view of the line list, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Total quantity across all lines (not just today's).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn quantity_added_on(&self, day: NaiveDate) -> u32 {
        self.items
            .iter()
            .filter(|line| line.added_on(day))
            .map(|line| line.quantity)
            .sum()
    }

    fn persist(&self) {
        self.store.save(&self.items);
    }
}
