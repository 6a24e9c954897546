//! Checkout module.
//!
//! Types for the two-step checkout: the payment record created first, the
//! order that references it, and the state machine the session layer
//! drives. The sequencing itself lives in `shelf-store`.

mod order;
mod payment;
mod state;

pub use order::{OrderDraft, OrderLine, PlacedOrder};
pub use payment::{mint_transaction_code, NewPayment, PaymentRecord, PaymentStatus};
pub use state::{CheckoutFailure, CheckoutForm, CheckoutState, PaymentMethod};
