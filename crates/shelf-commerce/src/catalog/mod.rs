//! Catalog module.
//!
//! Books, point-in-time catalog snapshots, and low-stock scanning.

mod book;
mod snapshot;

pub use book::Book;
pub use snapshot::{CatalogSnapshot, LowStockAlert, ReplenishmentPolicy};
