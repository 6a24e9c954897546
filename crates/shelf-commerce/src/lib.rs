//! Bookstore domain types and logic for the Shelf storefront.
//!
//! This crate provides the core types for the storefront and admin tools:
//!
//! - **Catalog**: Books, point-in-time catalog snapshots, low-stock scans
//! - **Cart**: Shopping cart with stock-capped line items and pricing
//! - **Checkout**: Payment/order records and the checkout state machine
//! - **Supply**: Supplier restock orders and reorder recommendations
//!
//! Everything here is synchronous and in-memory; talking to the backend
//! lives in `shelf-data`, and session wiring lives in `shelf-store`.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add(&book)?;
//!
//! let pricing = PriceBreakdown::for_cart(&cart);
//! println!("Total: {}", pricing.total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod supply;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Book, CatalogSnapshot, LowStockAlert, ReplenishmentPolicy};

    // Cart
    pub use crate::cart::{
        Cart, LineItem, PriceBreakdown, FLAT_SHIPPING_FEE_CENTS, FREE_SHIPPING_THRESHOLD_CENTS,
        VAT_RATE,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutFailure, CheckoutForm, CheckoutState, NewPayment, OrderDraft, OrderLine,
        PaymentMethod, PaymentRecord, PaymentStatus, PlacedOrder,
    };

    // Supply
    pub use crate::supply::{
        SupplyOrder, SupplyOrderDraft, SupplyOrderItem, SupplyOrderStatus, DEFAULT_UNIT_COST_CENTS,
    };
}
