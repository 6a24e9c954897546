//! Session error types.
//!
//! Every variant here is recoverable: failures surface as a message and
//! leave the session in an interactive state so the user can retry.

use shelf_commerce::CommerceError;
use shelf_data::FetchError;
use thiserror::Error;

/// Errors surfaced by the session layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Required fields missing; caught before any external call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Step A of checkout failed; no order was created.
    #[error("Could not create payment record")]
    PaymentCreationFailed(#[source] FetchError),

    /// Step B of checkout failed; the step-A payment record is left
    /// behind (the two writes are not transactional).
    #[error("Could not create order")]
    OrderCreationFailed(#[source] FetchError),

    /// Catalog read failed; the previous snapshot stays in place.
    #[error("Could not fetch from the backend")]
    Fetch(#[source] FetchError),

    /// A checkout attempt is already in flight.
    #[error("Checkout already in progress")]
    CheckoutInProgress,

    /// Domain-level rejection (out of stock, overflow, ...).
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}
