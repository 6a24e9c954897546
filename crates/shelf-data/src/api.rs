//! The abstract backend contract.

use crate::error::FetchError;
use async_trait::async_trait;
use shelf_commerce::catalog::Book;
use shelf_commerce::checkout::{NewPayment, OrderDraft, PaymentRecord, PlacedOrder};
use shelf_commerce::ids::CustomerId;

/// Everything the storefront needs from the backend.
///
/// The session layer only ever sees this trait, so the two-step checkout's
/// lack of rollback stays isolated here: a future implementation can add
/// reservation or compensation without touching callers.
#[async_trait]
pub trait BookstoreApi: Send + Sync {
    /// Fetch the full purchasable catalog with current stock figures.
    async fn fetch_books(&self) -> Result<Vec<Book>, FetchError>;

    /// Create a payment record. Step A of checkout.
    async fn create_payment(&self, payment: &NewPayment) -> Result<PaymentRecord, FetchError>;

    /// Create an order referencing an existing payment, scoped to the
    /// acting customer. Step B of checkout.
    async fn create_order(
        &self,
        customer: &CustomerId,
        draft: &OrderDraft,
    ) -> Result<PlacedOrder, FetchError>;

    /// List a customer's payment records.
    async fn payments_for_customer(
        &self,
        customer: &CustomerId,
    ) -> Result<Vec<PaymentRecord>, FetchError>;
}
