//! Cart pricing calculations.
//!
//! Totals are derived from the cart on every read, never cached on the
//! cart itself, so a mutation can never leave a stale total behind.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Orders strictly above this subtotal ship free (R650.00).
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 65_000;

/// Flat shipping fee below the free-shipping threshold (R89.99).
pub const FLAT_SHIPPING_FEE_CENTS: i64 = 8_999;

/// South African VAT rate, as a percentage.
pub const VAT_RATE: f64 = 15.0;

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Money,
    /// Flat fee, or zero above the free-shipping threshold.
    pub shipping: Money,
    /// VAT on the subtotal.
    pub tax: Money,
    /// Grand total (subtotal + shipping + tax).
    pub total: Money,
}

impl PriceBreakdown {
    /// Compute the breakdown for a cart.
    ///
    /// Arithmetic stays in integer cents; the only rounding happens once,
    /// inside the VAT percentage. Shipping is free only when the subtotal
    /// strictly exceeds the threshold; an order of exactly R650.00 still
    /// pays the flat fee.
    pub fn for_cart(cart: &Cart) -> Result<Self, CommerceError> {
        let currency = cart
            .items()
            .first()
            .map(|i| i.unit_price.currency)
            .unwrap_or_default();

        // An empty cart owes nothing: no shipping fee on thin air.
        if cart.is_empty() {
            let zero = Money::zero(currency);
            return Ok(Self {
                subtotal: zero,
                shipping: zero,
                tax: zero,
                total: zero,
            });
        }

        let line_totals = cart
            .items()
            .iter()
            .map(|i| i.line_total())
            .collect::<Result<Vec<_>, _>>()?;
        let subtotal =
            Money::try_sum(line_totals.iter(), currency).ok_or(CommerceError::Overflow)?;

        let shipping = if subtotal.amount_cents > FREE_SHIPPING_THRESHOLD_CENTS {
            Money::zero(currency)
        } else {
            Money::new(FLAT_SHIPPING_FEE_CENTS, currency)
        };

        let tax = subtotal.percentage(VAT_RATE);

        let total = subtotal
            .try_add(&shipping)
            .and_then(|t| t.try_add(&tax))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            shipping,
            tax,
            total,
        })
    }

    /// Check if the order ships free.
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero() && !self.subtotal.is_zero()
    }

    /// How much more the customer needs to spend for free shipping.
    ///
    /// `None` once the subtotal is at or past the threshold. The hint
    /// disappears at exactly the threshold even though that order still
    /// pays the flat fee.
    pub fn amount_to_free_shipping(&self) -> Option<Money> {
        if self.subtotal.amount_cents < FREE_SHIPPING_THRESHOLD_CENTS {
            Some(Money::new(
                FREE_SHIPPING_THRESHOLD_CENTS - self.subtotal.amount_cents,
                self.subtotal.currency,
            ))
        } else {
            None
        }
    }
}
