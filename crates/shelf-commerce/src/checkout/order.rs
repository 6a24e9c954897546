//! Order types.

use crate::cart::Cart;
use crate::checkout::PaymentMethod;
use crate::ids::{BookId, OrderId, PaymentId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One line of an order: the book, the quantity, and the price it was
/// sold at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Book purchased.
    pub book_id: BookId,
    /// Quantity purchased.
    pub quantity: i64,
    /// Unit price at checkout time.
    pub unit_price: Money,
}

/// An order to be created, referencing the payment that backs it.
///
/// Submitted to the order service after the payment record exists; the
/// server assigns the order its identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    /// Where to ship.
    pub shipping_address: String,
    /// How the customer pays.
    pub payment_method: PaymentMethod,
    /// Snapshot of the cart at submit time.
    pub items: Vec<OrderLine>,
    /// Payment record created in the step before this one.
    pub payment_id: PaymentId,
}

impl OrderDraft {
    /// Build a draft from the cart contents.
    pub fn from_cart(
        cart: &Cart,
        shipping_address: impl Into<String>,
        payment_method: PaymentMethod,
        payment_id: PaymentId,
    ) -> Self {
        Self {
            shipping_address: shipping_address.into(),
            payment_method,
            items: cart
                .items()
                .iter()
                .map(|i| OrderLine {
                    book_id: i.book_id.clone(),
                    quantity: i.quantity,
                    unit_price: i.unit_price,
                })
                .collect(),
            payment_id,
        }
    }

    /// Total item count across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// The order service's acknowledgement of a created order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedOrder {
    /// Server-assigned order identifier.
    pub order_id: OrderId,
}
