//! Payment record types.

use crate::ids::{unique_millis, PaymentId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Payment status as tracked by the payment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    /// Newly created, awaiting settlement. Every checkout starts here.
    #[default]
    Pending,
    /// Settled.
    Paid,
    /// Settlement failed.
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Failed => "Failed",
        }
    }

    /// Parse a status string; the backend is not consistent about case.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

/// A payment to be created, before the payment service assigns an ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPayment {
    /// Amount to charge (the cart's grand total).
    pub amount: Money,
    /// Always `Pending` at creation.
    pub status: PaymentStatus,
    /// Client-minted unique token for this attempt.
    pub transaction_code: String,
}

impl NewPayment {
    /// Draft a pending payment with a freshly minted transaction code.
    pub fn pending(amount: Money) -> Self {
        Self {
            amount,
            status: PaymentStatus::Pending,
            transaction_code: mint_transaction_code(),
        }
    }
}

/// A payment record as stored by the payment service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    /// Identifier assigned by the payment service.
    pub id: PaymentId,
    /// Amount charged.
    pub amount: Money,
    /// Current status.
    pub status: PaymentStatus,
    /// Transaction code minted at checkout time.
    pub transaction_code: String,
}

/// Mint a fresh transaction code (`TX-<millis>`).
///
/// Every checkout attempt gets its own code; a retry after failure is a
/// brand-new attempt, never a resume of the old one.
pub fn mint_transaction_code() -> String {
    format!("TX-{}", unique_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_code_shape() {
        let code = mint_transaction_code();
        assert!(code.starts_with("TX-"));
    }

    #[test]
    fn test_transaction_codes_unique_per_attempt() {
        assert_ne!(mint_transaction_code(), mint_transaction_code());
    }

    #[test]
    fn test_new_payment_starts_pending() {
        let payment = NewPayment::pending(Money::zar(60749));
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.amount.amount_cents, 60749);
    }
}
