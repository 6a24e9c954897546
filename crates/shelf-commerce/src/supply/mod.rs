//! Supplier restocking module.
//!
//! Supply orders drafted from low-stock signals, validated, and priced
//! once at creation time.

mod order;

pub use order::{
    SupplyOrder, SupplyOrderDraft, SupplyOrderItem, SupplyOrderStatus, DEFAULT_UNIT_COST_CENTS,
};
