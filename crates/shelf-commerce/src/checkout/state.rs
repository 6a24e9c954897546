//! Checkout state machine types.

use crate::ids::OrderId;
use serde::{Deserialize, Serialize};

/// Payment methods the storefront offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// Electronic funds transfer.
    Eft,
    /// Pay the courier on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Eft => "EFT",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Card" => Some(PaymentMethod::Card),
            "EFT" => Some(PaymentMethod::Eft),
            "Cash on Delivery" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }
}

/// What the customer filled in before submitting checkout.
///
/// The form layer validates presence before invoking the orchestrator,
/// but the orchestrator re-checks: no external call is made with missing
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutForm {
    /// Shipping address, free-form.
    pub shipping_address: String,
    /// Selected payment method.
    pub payment_method: Option<PaymentMethod>,
}

impl CheckoutForm {
    /// Create a filled-in form.
    pub fn new(shipping_address: impl Into<String>, payment_method: PaymentMethod) -> Self {
        Self {
            shipping_address: shipping_address.into(),
            payment_method: Some(payment_method),
        }
    }

    /// Fields still missing, empty when the form is submittable.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.shipping_address.trim().is_empty() {
            missing.push("shipping address");
        }
        if self.payment_method.is_none() {
            missing.push("payment method");
        }
        missing
    }
}

/// Which of the two dependent writes failed.
///
/// Surfaced to the customer as one failure message; the distinction is
/// kept for diagnostics. An `OrderCreationFailed` leaves the step-A
/// payment record behind; the two writes are not transactional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutFailure {
    /// The payment service rejected the payment record; no order call
    /// was made.
    PaymentCreationFailed,
    /// The order service rejected the order; the payment record stands.
    OrderCreationFailed,
}

impl CheckoutFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutFailure::PaymentCreationFailed => "payment_creation_failed",
            CheckoutFailure::OrderCreationFailed => "order_creation_failed",
        }
    }
}

/// State of the checkout orchestrator.
///
/// `Idle → Submitting → Succeeded | Failed`. At most one attempt is in
/// flight; re-entry while `Submitting` is ignored. A `Failed` attempt can
/// be retried, which starts a brand-new attempt with a fresh transaction
/// code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// No attempt in progress.
    #[default]
    Idle,
    /// Payment/order writes in flight; re-entry is ignored.
    Submitting,
    /// Both writes landed; the order ID is the server's.
    Succeeded(OrderId),
    /// One of the writes failed; cart left as it was.
    Failed(CheckoutFailure),
}

impl CheckoutState {
    /// Check if an attempt is currently in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, CheckoutState::Submitting)
    }
}
