//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Book not found in the current catalog snapshot.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Cannot add an out-of-stock book to the cart.
    #[error("Out of stock: {0}")]
    OutOfStock(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Validation error (missing required fields).
    #[error("Validation error: {0}")]
    Validation(String),
}
