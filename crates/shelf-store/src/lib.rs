//! Session layer for the Shelf storefront.
//!
//! Wires the domain types from `shelf-commerce` to the backend contract
//! from `shelf-data`:
//!
//! - [`StorefrontSession`]: one shopper's catalog snapshot, cart, and
//!   checkout orchestration. Session-local; nothing here survives the
//!   session except what the backend stored.
//! - [`ReplenishmentDesk`]: the admin's restocking view: low-stock
//!   alerts, supply-order drafting, and the placed-order list.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_store::StorefrontSession;
//! use shelf_commerce::checkout::{CheckoutForm, PaymentMethod};
//!
//! let mut session = StorefrontSession::new(api, customer);
//! session.refresh_catalog().await?;
//! session.add_to_cart(&book_id)?;
//!
//! let form = CheckoutForm::new("12 Long Street, Cape Town", PaymentMethod::Card);
//! let order_id = session.submit_checkout(&form).await?;
//! ```

mod error;
mod replenishment;
mod session;

pub use error::StoreError;
pub use replenishment::{DeskStats, ReplenishmentDesk};
pub use session::StorefrontSession;
