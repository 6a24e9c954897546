//! Shopping cart module.
//!
//! Contains the cart ledger, its line items, and the pricing engine.

mod cart;
mod pricing;

pub use cart::{Cart, LineItem};
pub use pricing::{
    PriceBreakdown, FLAT_SHIPPING_FEE_CENTS, FREE_SHIPPING_THRESHOLD_CENTS, VAT_RATE,
};
