//! Supply order types.

use crate::catalog::LowStockAlert;
use crate::error::CommerceError;
use crate::ids::SupplyOrderId;
use crate::money::{Currency, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder unit cost for quick-added items (R100.00).
///
/// Quick-add does not fetch real supplier pricing; the admin adjusts the
/// cost before ordering if it matters.
pub const DEFAULT_UNIT_COST_CENTS: i64 = 10_000;

/// Lifecycle of a supply order.
///
/// Orders always start `Pending`; later transitions are driven by the
/// supplier side, not by this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupplyOrderStatus {
    #[default]
    Pending,
    Ordered,
    Shipped,
    Delivered,
    Cancelled,
}

impl SupplyOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyOrderStatus::Pending => "pending",
            SupplyOrderStatus::Ordered => "ordered",
            SupplyOrderStatus::Shipped => "shipped",
            SupplyOrderStatus::Delivered => "delivered",
            SupplyOrderStatus::Cancelled => "cancelled",
        }
    }
}

/// One restock line: a title, how many, and what each costs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplyOrderItem {
    /// Book title.
    pub book_title: String,
    /// ISBN, when known.
    pub isbn: Option<String>,
    /// Copies to order.
    pub quantity: i64,
    /// Cost per copy.
    pub unit_cost: Money,
}

impl SupplyOrderItem {
    /// Line cost (quantity times unit cost).
    pub fn line_cost(&self) -> Result<Money, CommerceError> {
        self.unit_cost
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A placed supplier restock order.
///
/// `total_cost` is computed once at creation and stored; editing a placed
/// order is out of scope, so it can never drift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplyOrder {
    /// Locally generated, time-based identifier.
    pub id: SupplyOrderId,
    /// Supplier the order goes to.
    pub supplier: String,
    /// Restock lines.
    pub items: Vec<SupplyOrderItem>,
    /// Current status; starts `pending`.
    pub status: SupplyOrderStatus,
    /// Date the order was created.
    pub order_date: NaiveDate,
    /// Date the supplier promised delivery.
    pub expected_delivery: NaiveDate,
    /// Free-form instructions for the supplier.
    pub notes: String,
    /// Sum of quantity times unit cost over all lines, fixed at creation.
    pub total_cost: Money,
}

/// A supply order being drafted, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SupplyOrderDraft {
    /// Selected supplier, empty until chosen.
    pub supplier: String,
    /// Expected delivery date, unset until chosen.
    pub expected_delivery: Option<NaiveDate>,
    /// Free-form instructions.
    pub notes: String,
    /// Lines added so far.
    pub items: Vec<SupplyOrderItem>,
}

impl SupplyOrderDraft {
    /// Start an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line item.
    pub fn add_item(&mut self, item: SupplyOrderItem) {
        self.items.push(item);
    }

    /// Append a line pre-filled from a low-stock alert: the recommended
    /// quantity at the placeholder unit cost.
    pub fn quick_add(&mut self, alert: &LowStockAlert) {
        self.items.push(SupplyOrderItem {
            book_title: alert.title.clone(),
            isbn: alert.isbn.clone(),
            quantity: alert.recommended_order,
            unit_cost: Money::zar(DEFAULT_UNIT_COST_CENTS),
        });
    }

    /// Remove a line by index. Out-of-range indexes are ignored.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// Running total of the draft, for display while editing.
    pub fn running_total(&self) -> Result<Money, CommerceError> {
        let line_costs = self
            .items
            .iter()
            .map(|i| i.line_cost())
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(line_costs.iter(), Currency::ZAR).ok_or(CommerceError::Overflow)
    }

    /// Validate the draft and turn it into a placed order.
    ///
    /// Requires a supplier, an expected delivery date, and at least one
    /// line; otherwise nothing is produced. The order starts `pending`
    /// with its total fixed at creation time.
    pub fn submit(self, order_date: NaiveDate) -> Result<SupplyOrder, CommerceError> {
        if self.supplier.trim().is_empty() {
            return Err(CommerceError::Validation("supplier is required".into()));
        }
        let expected_delivery = self.expected_delivery.ok_or_else(|| {
            CommerceError::Validation("expected delivery date is required".into())
        })?;
        if self.items.is_empty() {
            return Err(CommerceError::Validation(
                "at least one item is required".into(),
            ));
        }

        let total_cost = self.running_total()?;

        Ok(SupplyOrder {
            id: SupplyOrderId::generate(),
            supplier: self.supplier,
            items: self.items,
            status: SupplyOrderStatus::Pending,
            order_date,
            expected_delivery,
            notes: self.notes,
            total_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::BookId;

    fn item(qty: i64, unit_cents: i64) -> SupplyOrderItem {
        SupplyOrderItem {
            book_title: "1984".to_string(),
            isbn: None,
            quantity: qty,
            unit_cost: Money::zar(unit_cents),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn valid_draft() -> SupplyOrderDraft {
        SupplyOrderDraft {
            supplier: "Penguin Random House".to_string(),
            expected_delivery: Some(date("2026-09-15")),
            notes: String::new(),
            items: vec![item(5, 10000), item(3, 5000)],
        }
    }

    #[test]
    fn test_submit_computes_total_once() {
        // 5 x R100 + 3 x R50 = R650
        let order = valid_draft().submit(date("2026-08-26")).unwrap();
        assert_eq!(order.total_cost.amount_cents, 65000);
        assert_eq!(order.status, SupplyOrderStatus::Pending);
        assert!(order.id.as_str().starts_with("SO-"));
        assert_eq!(order.order_date, date("2026-08-26"));
    }

    #[test]
    fn test_submit_rejects_missing_supplier() {
        let mut draft = valid_draft();
        draft.supplier = "  ".to_string();
        assert!(matches!(
            draft.submit(date("2026-08-26")),
            Err(CommerceError::Validation(_))
        ));
    }

    #[test]
    fn test_submit_rejects_missing_delivery_date() {
        let mut draft = valid_draft();
        draft.expected_delivery = None;
        assert!(matches!(
            draft.submit(date("2026-08-26")),
            Err(CommerceError::Validation(_))
        ));
    }

    #[test]
    fn test_submit_rejects_empty_items() {
        let mut draft = valid_draft();
        draft.items.clear();
        assert!(matches!(
            draft.submit(date("2026-08-26")),
            Err(CommerceError::Validation(_))
        ));
    }

    #[test]
    fn test_quick_add_uses_recommendation_and_default_cost() {
        let alert = LowStockAlert {
            book_id: BookId::new("b1"),
            title: "Pride and Prejudice".to_string(),
            author: "Jane Austen".to_string(),
            isbn: Some("9780141439518".to_string()),
            current_stock: 0,
            recommended_order: 4,
        };

        let mut draft = SupplyOrderDraft::new();
        draft.quick_add(&alert);

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].quantity, 4);
        assert_eq!(draft.items[0].unit_cost.amount_cents, DEFAULT_UNIT_COST_CENTS);
        assert_eq!(draft.items[0].isbn.as_deref(), Some("9780141439518"));
    }

    #[test]
    fn test_remove_item() {
        let mut draft = valid_draft();
        draft.remove_item(0);
        assert_eq!(draft.items.len(), 1);
        // Out of range: ignored.
        draft.remove_item(7);
        assert_eq!(draft.items.len(), 1);
    }

    #[test]
    fn test_running_total_tracks_edits() {
        let mut draft = valid_draft();
        assert_eq!(draft.running_total().unwrap().amount_cents, 65000);
        draft.remove_item(1);
        assert_eq!(draft.running_total().unwrap().amount_cents, 50000);
    }
}
