//! One shopper's storefront session.

use crate::error::StoreError;
use shelf_commerce::cart::{Cart, PriceBreakdown};
use shelf_commerce::catalog::CatalogSnapshot;
use shelf_commerce::checkout::{
    CheckoutFailure, CheckoutForm, CheckoutState, NewPayment, OrderDraft, PaymentRecord,
};
use shelf_commerce::ids::{BookId, CustomerId, OrderId};
use shelf_data::BookstoreApi;

/// Called when a checkout lands, e.g. to refresh the cart badge.
type CheckoutListener = Box<dyn Fn(&OrderId) + Send + Sync>;

/// A single customer's session: catalog snapshot, cart, and checkout.
///
/// There is exactly one mutator per session, so the cart and snapshot
/// need no locking; only the backend calls are async. State is
/// session-local and vanishes with the session; durable records live in
/// the backend.
pub struct StorefrontSession<A: BookstoreApi> {
    api: A,
    customer: CustomerId,
    catalog: CatalogSnapshot,
    cart: Cart,
    checkout: CheckoutState,
    on_checkout_complete: Option<CheckoutListener>,
}

impl<A: BookstoreApi> StorefrontSession<A> {
    /// Start a fresh session for a customer. The catalog is empty until
    /// the first [`refresh_catalog`](Self::refresh_catalog).
    pub fn new(api: A, customer: CustomerId) -> Self {
        Self {
            api,
            customer,
            catalog: CatalogSnapshot::empty(),
            cart: Cart::new(),
            checkout: CheckoutState::Idle,
            on_checkout_complete: None,
        }
    }

    /// Register a listener invoked after a successful checkout.
    pub fn on_checkout_complete(
        mut self,
        listener: impl Fn(&OrderId) + Send + Sync + 'static,
    ) -> Self {
        self.on_checkout_complete = Some(Box::new(listener));
        self
    }

    /// The current catalog snapshot.
    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// The cart ledger, read-only. Mutations go through the session so
    /// quantities are always checked against the snapshot's stock.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current checkout state.
    pub fn checkout_state(&self) -> &CheckoutState {
        &self.checkout
    }

    /// Sum of quantities in the cart, for the badge.
    pub fn cart_badge(&self) -> i64 {
        self.cart.item_count()
    }

    /// Pricing breakdown, recomputed from the cart on every call.
    pub fn pricing(&self) -> Result<PriceBreakdown, StoreError> {
        Ok(PriceBreakdown::for_cart(&self.cart)?)
    }

    /// Replace the catalog snapshot with a fresh fetch.
    ///
    /// On failure the previous snapshot (or the empty one) stays in
    /// place; the error is logged and returned, and nothing retries
    /// automatically; the next explicit refresh is the retry.
    pub async fn refresh_catalog(&mut self) -> Result<(), StoreError> {
        match self.api.fetch_books().await {
            Ok(books) => {
                tracing::info!(books = books.len(), "catalog refreshed");
                self.catalog = CatalogSnapshot::new(books);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog refresh failed, keeping previous snapshot");
                Err(StoreError::Fetch(e))
            }
        }
    }

    /// Add one copy of a book to the cart, capped by snapshot stock.
    pub fn add_to_cart(&mut self, id: &BookId) -> Result<(), StoreError> {
        let book = self
            .catalog
            .get(id)
            .ok_or_else(|| shelf_commerce::CommerceError::BookNotFound(id.to_string()))?;
        self.cart.add(book)?;
        Ok(())
    }

    /// Remove one copy; the line disappears at quantity one.
    pub fn decrement(&mut self, id: &BookId) {
        self.cart.decrement(id);
    }

    /// Set a line's quantity, clamped to the snapshot's stock.
    pub fn set_quantity(&mut self, id: &BookId, quantity: i64) -> bool {
        let stock = self.catalog.stock_for(id);
        self.cart.set_quantity(id, quantity, stock)
    }

    /// Remove a line unconditionally.
    pub fn remove_from_cart(&mut self, id: &BookId) -> bool {
        self.cart.remove(id)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Run the two-step checkout: create the payment record, then the
    /// order referencing it.
    ///
    /// The order call is never issued before the payment call resolves.
    /// A payment failure leaves the cart untouched and creates no order;
    /// an order failure also leaves the cart untouched but the payment
    /// record from step A stands, the writes are not transactional.
    /// Each attempt mints a fresh transaction code, so a retry after
    /// failure is a new attempt, not a resume.
    pub async fn submit_checkout(&mut self, form: &CheckoutForm) -> Result<OrderId, StoreError> {
        if self.checkout.is_submitting() {
            return Err(StoreError::CheckoutInProgress);
        }
        if self.cart.is_empty() {
            return Err(StoreError::Validation("cart is empty".into()));
        }
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Validation(format!(
                "missing {}",
                missing.join(", ")
            )));
        }
        let payment_method = form
            .payment_method
            .ok_or_else(|| StoreError::Validation("missing payment method".into()))?;

        let pricing = self.pricing()?;
        self.checkout = CheckoutState::Submitting;

        // Step A: payment record.
        let payment = NewPayment::pending(pricing.total);
        tracing::info!(
            transaction_code = %payment.transaction_code,
            amount = payment.amount.amount_cents,
            "checkout: creating payment record"
        );
        let record = match self.api.create_payment(&payment).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "checkout: payment creation failed");
                self.checkout = CheckoutState::Failed(CheckoutFailure::PaymentCreationFailed);
                return Err(StoreError::PaymentCreationFailed(e));
            }
        };

        // Step B: order referencing the payment.
        let draft = OrderDraft::from_cart(
            &self.cart,
            form.shipping_address.clone(),
            payment_method,
            record.id.clone(),
        );
        let placed = match self.api.create_order(&self.customer, &draft).await {
            Ok(placed) => placed,
            Err(e) => {
                // The step-A payment record stays behind, unreconciled.
                tracing::warn!(
                    error = %e,
                    payment_id = %record.id,
                    "checkout: order creation failed"
                );
                self.checkout = CheckoutState::Failed(CheckoutFailure::OrderCreationFailed);
                return Err(StoreError::OrderCreationFailed(e));
            }
        };

        tracing::info!(order_id = %placed.order_id, "checkout succeeded");
        self.cart.clear();
        self.checkout = CheckoutState::Succeeded(placed.order_id.clone());
        if let Some(listener) = &self.on_checkout_complete {
            listener(&placed.order_id);
        }
        Ok(placed.order_id)
    }

    /// The customer's payment records, straight from the backend.
    pub async fn payment_history(&self) -> Result<Vec<PaymentRecord>, StoreError> {
        self.api
            .payments_for_customer(&self.customer)
            .await
            .map_err(StoreError::Fetch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shelf_commerce::catalog::Book;
    use shelf_commerce::checkout::{PaymentMethod, PaymentStatus, PlacedOrder};
    use shelf_commerce::ids::PaymentId;
    use shelf_commerce::money::Money;
    use shelf_data::FetchError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scriptable backend that records calls.
    #[derive(Default)]
    struct MockApi {
        books: Vec<Book>,
        fail_books: bool,
        fail_payment: bool,
        fail_order: bool,
        payment_calls: AtomicUsize,
        order_calls: AtomicUsize,
        last_payment: Mutex<Option<NewPayment>>,
        last_order: Mutex<Option<OrderDraft>>,
        stored_payments: Vec<PaymentRecord>,
    }

    #[async_trait]
    impl BookstoreApi for MockApi {
        async fn fetch_books(&self) -> Result<Vec<Book>, FetchError> {
            if self.fail_books {
                return Err(FetchError::Request("connection refused".into()));
            }
            Ok(self.books.clone())
        }

        async fn create_payment(&self, payment: &NewPayment) -> Result<PaymentRecord, FetchError> {
            self.payment_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payment.lock().unwrap() = Some(payment.clone());
            if self.fail_payment {
                return Err(FetchError::Http {
                    status: 500,
                    message: "payment service down".into(),
                });
            }
            Ok(PaymentRecord {
                id: PaymentId::new("pay-1"),
                amount: payment.amount,
                status: payment.status,
                transaction_code: payment.transaction_code.clone(),
            })
        }

        async fn create_order(
            &self,
            _customer: &CustomerId,
            draft: &OrderDraft,
        ) -> Result<PlacedOrder, FetchError> {
            // Ordering guarantee: the payment call must have resolved first.
            assert!(
                self.payment_calls.load(Ordering::SeqCst) > self.order_calls.load(Ordering::SeqCst),
                "order creation attempted before payment creation"
            );
            self.order_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_order.lock().unwrap() = Some(draft.clone());
            if self.fail_order {
                return Err(FetchError::Http {
                    status: 500,
                    message: "order service down".into(),
                });
            }
            Ok(PlacedOrder {
                order_id: OrderId::new("order-9"),
            })
        }

        async fn payments_for_customer(
            &self,
            _customer: &CustomerId,
        ) -> Result<Vec<PaymentRecord>, FetchError> {
            Ok(self.stored_payments.clone())
        }
    }

    fn book(id: &str, price_cents: i64, stock: i64) -> Book {
        Book::new(
            BookId::new(id),
            format!("Title {id}"),
            "Author",
            Money::zar(price_cents),
            stock,
        )
    }

    fn session_with_books(books: Vec<Book>) -> StorefrontSession<MockApi> {
        StorefrontSession::new(
            MockApi {
                books,
                ..Default::default()
            },
            CustomerId::new("42"),
        )
    }

    fn form() -> CheckoutForm {
        CheckoutForm::new("12 Long Street, Cape Town", PaymentMethod::Card)
    }

    #[tokio::test]
    async fn test_refresh_catalog_replaces_snapshot() {
        let mut session = session_with_books(vec![book("b1", 20000, 3)]);
        assert!(session.catalog().is_empty());

        session.refresh_catalog().await.unwrap();
        assert_eq!(session.catalog().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let mut session = session_with_books(vec![book("b1", 20000, 3)]);
        session.refresh_catalog().await.unwrap();

        session.api.fail_books = true;
        let result = session.refresh_catalog().await;
        assert!(matches!(result, Err(StoreError::Fetch(_))));
        // Prior snapshot still there.
        assert_eq!(session.catalog().len(), 1);
    }

    #[tokio::test]
    async fn test_cart_ops_validate_against_snapshot() {
        let mut session = session_with_books(vec![book("b1", 20000, 2)]);
        session.refresh_catalog().await.unwrap();
        let id = BookId::new("b1");

        session.add_to_cart(&id).unwrap();
        session.add_to_cart(&id).unwrap();
        session.add_to_cart(&id).unwrap(); // silent no-op at ceiling
        assert_eq!(session.cart_badge(), 2);

        assert!(session.set_quantity(&id, 99));
        assert_eq!(session.cart().get(&id).unwrap().quantity, 2);

        let missing = BookId::new("nope");
        assert!(session.add_to_cart(&missing).is_err());
    }

    #[tokio::test]
    async fn test_successful_checkout_clears_cart_and_notifies() {
        use std::sync::atomic::AtomicBool;
        use std::sync::Arc;

        let notified = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&notified);

        let mut session = session_with_books(vec![book("b1", 20000, 5), book("b2", 5000, 5)])
            .on_checkout_complete(move |_| flag.store(true, Ordering::SeqCst));
        session.refresh_catalog().await.unwrap();
        session.add_to_cart(&BookId::new("b1")).unwrap();
        session.add_to_cart(&BookId::new("b1")).unwrap();
        session.add_to_cart(&BookId::new("b2")).unwrap();

        let order_id = session.submit_checkout(&form()).await.unwrap();

        assert_eq!(order_id, OrderId::new("order-9"));
        assert!(session.cart().is_empty());
        assert!(notified.load(Ordering::SeqCst));
        assert_eq!(
            session.checkout_state(),
            &CheckoutState::Succeeded(OrderId::new("order-9"))
        );

        // The payment charged the full breakdown total: R450 subtotal
        // + R89.99 shipping + R67.50 VAT.
        let payment = session.api.last_payment.lock().unwrap().clone().unwrap();
        assert_eq!(payment.amount.amount_cents, 60749);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.transaction_code.starts_with("TX-"));

        // The order referenced the created payment and snapshotted the cart.
        let order = session.api.last_order.lock().unwrap().clone().unwrap();
        assert_eq!(order.payment_id, PaymentId::new("pay-1"));
        assert_eq!(order.item_count(), 3);
    }

    #[tokio::test]
    async fn test_payment_failure_makes_no_order_call() {
        let mut session = session_with_books(vec![book("b1", 20000, 5)]);
        session.refresh_catalog().await.unwrap();
        session.add_to_cart(&BookId::new("b1")).unwrap();
        session.api.fail_payment = true;

        let result = session.submit_checkout(&form()).await;

        assert!(matches!(result, Err(StoreError::PaymentCreationFailed(_))));
        assert_eq!(session.api.payment_calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.api.order_calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.cart_badge(), 1); // cart untouched
        assert_eq!(
            session.checkout_state(),
            &CheckoutState::Failed(CheckoutFailure::PaymentCreationFailed)
        );
    }

    #[tokio::test]
    async fn test_order_failure_keeps_cart_and_payment_stands() {
        let mut session = session_with_books(vec![book("b1", 20000, 5)]);
        session.refresh_catalog().await.unwrap();
        session.add_to_cart(&BookId::new("b1")).unwrap();
        session.api.fail_order = true;

        let result = session.submit_checkout(&form()).await;

        assert!(matches!(result, Err(StoreError::OrderCreationFailed(_))));
        // Step A ran and is not rolled back.
        assert_eq!(session.api.payment_calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.api.order_calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.cart_badge(), 1);
        assert_eq!(
            session.checkout_state(),
            &CheckoutState::Failed(CheckoutFailure::OrderCreationFailed)
        );
    }

    #[tokio::test]
    async fn test_retry_after_failure_mints_fresh_transaction_code() {
        let mut session = session_with_books(vec![book("b1", 20000, 5)]);
        session.refresh_catalog().await.unwrap();
        session.add_to_cart(&BookId::new("b1")).unwrap();

        session.api.fail_payment = true;
        let _ = session.submit_checkout(&form()).await;
        let first = session
            .api
            .last_payment
            .lock()
            .unwrap()
            .clone()
            .unwrap()
            .transaction_code;

        session.api.fail_payment = false;
        session.submit_checkout(&form()).await.unwrap();
        let second = session
            .api
            .last_payment
            .lock()
            .unwrap()
            .clone()
            .unwrap()
            .transaction_code;

        assert_ne!(first, second);
        assert_eq!(session.api.payment_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart_and_missing_fields() {
        let mut session = session_with_books(vec![book("b1", 20000, 5)]);
        session.refresh_catalog().await.unwrap();

        // Empty cart: rejected before any call.
        let result = session.submit_checkout(&form()).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        // Missing fields: rejected before any call.
        session.add_to_cart(&BookId::new("b1")).unwrap();
        let blank = CheckoutForm {
            shipping_address: String::new(),
            payment_method: None,
        };
        let result = session.submit_checkout(&blank).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        assert_eq!(session.api.payment_calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.api.order_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reentry_while_submitting_is_rejected() {
        let mut session = session_with_books(vec![book("b1", 20000, 5)]);
        session.refresh_catalog().await.unwrap();
        session.add_to_cart(&BookId::new("b1")).unwrap();

        // Simulate an in-flight attempt.
        session.checkout = CheckoutState::Submitting;
        let result = session.submit_checkout(&form()).await;

        assert!(matches!(result, Err(StoreError::CheckoutInProgress)));
        assert_eq!(session.api.payment_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_payment_history_passthrough() {
        let mut api = MockApi::default();
        api.stored_payments = vec![PaymentRecord {
            id: PaymentId::new("41"),
            amount: Money::zar(60749),
            status: PaymentStatus::Paid,
            transaction_code: "TX-1".into(),
        }];
        let session = StorefrontSession::new(api, CustomerId::new("42"));

        let history = session.payment_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, PaymentId::new("41"));
    }
}
