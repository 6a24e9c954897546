//! The admin's restocking desk.

use crate::error::StoreError;
use shelf_commerce::catalog::{CatalogSnapshot, LowStockAlert, ReplenishmentPolicy};
use shelf_commerce::money::{Currency, Money};
use shelf_commerce::supply::{SupplyOrder, SupplyOrderDraft, SupplyOrderItem, SupplyOrderStatus};

/// Dashboard figures over the placed supply orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeskStats {
    /// Orders awaiting supplier confirmation.
    pub pending: usize,
    /// Orders currently shipped.
    pub in_transit: usize,
    /// Total cost across all placed orders.
    pub total_spend: Money,
}

/// Low-stock alerts, the supply-order draft being edited, and the list
/// of placed orders (most recent first).
///
/// Session-local like the cart: placed orders live here for the admin's
/// current view; durable persistence is out of scope.
#[derive(Debug, Default)]
pub struct ReplenishmentDesk {
    policy: ReplenishmentPolicy,
    draft: SupplyOrderDraft,
    orders: Vec<SupplyOrder>,
}

impl ReplenishmentDesk {
    /// Create a desk with the default replenishment policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a desk with an explicit policy.
    pub fn with_policy(policy: ReplenishmentPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The active policy.
    pub fn policy(&self) -> ReplenishmentPolicy {
        self.policy
    }

    /// Scan the catalog snapshot for books needing a reorder.
    pub fn alerts(&self, catalog: &CatalogSnapshot) -> Vec<LowStockAlert> {
        catalog.low_stock(self.policy)
    }

    /// The draft currently being edited.
    pub fn draft(&self) -> &SupplyOrderDraft {
        &self.draft
    }

    /// Mutable access to the draft for form edits (supplier, delivery
    /// date, notes).
    pub fn draft_mut(&mut self) -> &mut SupplyOrderDraft {
        &mut self.draft
    }

    /// Add a manually entered line to the draft.
    pub fn add_item(&mut self, item: SupplyOrderItem) {
        self.draft.add_item(item);
    }

    /// Add a line pre-filled from a low-stock alert.
    pub fn quick_add(&mut self, alert: &LowStockAlert) {
        self.draft.quick_add(alert);
    }

    /// Validate the draft and place it as a new supply order.
    ///
    /// On success the draft resets and the order is prepended to the
    /// list (most recent first), starting `pending`. On validation
    /// failure the draft stays as it was for the admin to fix.
    pub fn create_order(&mut self) -> Result<&SupplyOrder, StoreError> {
        let today = chrono::Local::now().date_naive();
        let order = self.draft.clone().submit(today)?;
        tracing::info!(
            id = %order.id,
            supplier = %order.supplier,
            total_cents = order.total_cost.amount_cents,
            "supply order created"
        );
        self.draft = SupplyOrderDraft::new();
        self.orders.insert(0, order);
        Ok(&self.orders[0])
    }

    /// Discard the draft without placing it.
    pub fn discard_draft(&mut self) {
        self.draft = SupplyOrderDraft::new();
    }

    /// Placed orders, most recent first.
    pub fn orders(&self) -> &[SupplyOrder] {
        &self.orders
    }

    /// Dashboard stats over the placed orders.
    pub fn stats(&self) -> Result<DeskStats, StoreError> {
        let total_spend = Money::try_sum(self.orders.iter().map(|o| &o.total_cost), Currency::ZAR)
            .ok_or(shelf_commerce::CommerceError::Overflow)?;
        Ok(DeskStats {
            pending: self
                .orders
                .iter()
                .filter(|o| o.status == SupplyOrderStatus::Pending)
                .count(),
            in_transit: self
                .orders
                .iter()
                .filter(|o| o.status == SupplyOrderStatus::Shipped)
                .count(),
            total_spend,
        })
    }
}
