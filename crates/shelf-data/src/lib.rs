//! Backend access for the Shelf storefront.
//!
//! The backend (inventory, payments, orders) is an external collaborator;
//! this crate owns the seam. [`BookstoreApi`] is the abstract contract the
//! session layer consumes, and [`RestBookstore`] is its production
//! implementation over the store's REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_data::{RestBookstore, StoreConfig, BookstoreApi};
//!
//! let api = RestBookstore::new(StoreConfig::new("https://api.shelf.example"))?;
//! let books = api.fetch_books().await?;
//! ```

mod api;
mod error;
mod rest;

pub use api::BookstoreApi;
pub use error::FetchError;
pub use rest::{RestBookstore, StoreConfig};
