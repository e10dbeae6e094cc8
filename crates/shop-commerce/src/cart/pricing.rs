//! Cart totals.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shipping and tax rules applied to a cart.
///
/// Amounts are in minor units of the cart's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Shipping is free when the subtotal is strictly above this amount.
    pub free_shipping_over_cents: i64,
    /// Flat shipping fee charged at or below the threshold.
    pub flat_shipping_cents: i64,
    /// Tax rate on the subtotal, in basis points.
    pub tax_rate_bps: i64,
}

impl PricingPolicy {
    /// Storefront policy: free shipping over 100.00, otherwise 15.00; 8% tax.
    pub const STANDARD: PricingPolicy = PricingPolicy {
        free_shipping_over_cents: 10_000,
        flat_shipping_cents: 1_500,
        tax_rate_bps: 800,
    };

    /// Shipping charged for a given subtotal.
    ///
    /// Nothing is charged on an empty cart.
    pub fn shipping_for(&self, subtotal: &Money, is_empty: bool) -> Money {
        if is_empty || subtotal.amount_cents > self.free_shipping_over_cents {
            Money::zero(subtotal.currency)
        } else {
            Money::new(self.flat_shipping_cents, subtotal.currency)
        }
    }

    /// Compute the cart's derived totals.
    ///
    /// Pure: never touches the cart, so calling it twice without a mutation
    /// in between gives identical results.
    pub fn totals(&self, cart: &Cart) -> Result<CartTotals, CommerceError> {
        let currency = cart.currency();
        let line_totals = cart
            .lines()
            .iter()
            .map(|line| line.line_total())
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = Money::checked_sum(line_totals, currency)?;
        let shipping = self.shipping_for(&subtotal, cart.is_empty());
        let tax = subtotal.apply_rate_bps(self.tax_rate_bps)?;
        let total = subtotal.checked_add(&shipping)?.checked_add(&tax)?;

        Ok(CartTotals {
            subtotal,
            shipping,
            tax,
            total,
        })
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Derived money figures for a cart. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    /// Subtotal plus shipping plus tax.
    pub total: Money,
}

impl CartTotals {
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            shipping: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
        }
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// Shipping as shown in the summary: "Free" or the amount.
    pub fn shipping_label(&self) -> String {
        if self.has_free_shipping() {
            "Free".to_string()
        } else {
            self.shipping.display()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::ids::ProductId;

    fn cart_with(lines: &[(&str, i64, i64)]) -> Cart {
        let mut cart = Cart::new();
        for (id, cents, qty) in lines {
            let product = Product::new(*id, format!("Product {id}"), Money::new(*cents, Currency::USD));
            cart.add(&product, *qty).unwrap();
        }
        cart
    }

    fn cents(totals: &CartTotals) -> (i64, i64, i64, i64) {
        (
            totals.subtotal.amount_cents,
            totals.shipping.amount_cents,
            totals.tax.amount_cents,
            totals.total.amount_cents,
        )
    }

    #[test]
    fn test_below_threshold_pays_shipping() {
        let cart = cart_with(&[("sku-1", 4000, 2)]);
        let totals = PricingPolicy::STANDARD.totals(&cart).unwrap();
        assert_eq!(cents(&totals), (8000, 1500, 640, 10_140));
        assert_eq!(totals.shipping_label(), "$15.00");
    }

    #[test]
    fn test_above_threshold_ships_free() {
        let cart = cart_with(&[("sku-1", 4000, 3)]);
        let totals = PricingPolicy::STANDARD.totals(&cart).unwrap();
        assert_eq!(cents(&totals), (12_000, 0, 960, 12_960));
        assert_eq!(totals.shipping_label(), "Free");
    }

    #[test]
    fn test_threshold_boundary() {
        // Exactly 100.00 still pays shipping.
        let at = PricingPolicy::STANDARD
            .totals(&cart_with(&[("a", 10_000, 1)]))
            .unwrap();
        assert_eq!(at.shipping.amount_cents, 1500);

        // One cent over ships free.
        let over = PricingPolicy::STANDARD
            .totals(&cart_with(&[("a", 10_001, 1)]))
            .unwrap();
        assert!(over.has_free_shipping());
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let totals = PricingPolicy::STANDARD.totals(&Cart::new()).unwrap();
        assert_eq!(totals, CartTotals::zero(Currency::USD));
    }

    #[test]
    fn test_free_item_still_pays_shipping() {
        let totals = PricingPolicy::STANDARD
            .totals(&cart_with(&[("freebie", 0, 1)]))
            .unwrap();
        assert_eq!(cents(&totals), (0, 1500, 0, 1500));
    }

    #[test]
    fn test_totals_are_pure() {
        let cart = cart_with(&[("a", 1999, 2), ("b", 349, 5)]);
        let first = PricingPolicy::STANDARD.totals(&cart).unwrap();
        let second = PricingPolicy::STANDARD.totals(&cart).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut cart = cart_with(&[("a", i64::MAX / 2, 1)]);
        cart.set_quantity(&ProductId::new("a"), 3);
        assert!(matches!(
            PricingPolicy::STANDARD.totals(&cart),
            Err(CommerceError::Overflow)
        ));
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            free_shipping_over_cents: 5_000,
            flat_shipping_cents: 499,
            tax_rate_bps: 1_000,
        };
        let totals = policy.totals(&cart_with(&[("a", 2_500, 1)])).unwrap();
        assert_eq!(cents(&totals), (2_500, 499, 250, 3_249));
    }
}
