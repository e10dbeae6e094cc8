//! Cart and cart line types.

use std::collections::HashSet;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One product's aggregated quantity within a cart.
///
/// Serialized as the product's fields with a `quantity` field alongside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    #[serde(flatten)]
    pub product: Product,
    /// Always positive.
    pub quantity: i64,
}

impl CartLine {
    pub fn new(product: Product, quantity: i64) -> Self {
        Self { product, quantity }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product.price.checked_mul(self.quantity)
    }
}

/// Ordered cart lines, at most one per product.
///
/// Lines stay in the order they were first added. Deserialization validates
/// every line, so a `Cart` read back from storage upholds the same
/// invariants as one built through its methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines, checking quantities, product fields,
    /// id uniqueness and that every line shares one currency.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        let currency = lines.first().map(|l| l.product.price.currency);
        for line in &lines {
            if line.quantity <= 0 {
                return Err(CommerceError::ValidationError(format!(
                    "cart line {} has non-positive quantity {}",
                    line.product_id(),
                    line.quantity
                )));
            }
            line.product.validate()?;
            if Some(line.product.price.currency) != currency {
                return Err(CommerceError::ValidationError(format!(
                    "cart line {} is priced in {}, cart is in {}",
                    line.product_id(),
                    line.product.price.currency,
                    currency.unwrap_or_default()
                )));
            }
            if !seen.insert(line.product_id()) {
                return Err(CommerceError::ValidationError(format!(
                    "duplicate cart line for product {}",
                    line.product_id()
                )));
            }
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines (the cart badge count).
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.quantity))
    }

    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Currency of the cart's prices; USD for an empty cart.
    pub fn currency(&self) -> Currency {
        self.lines
            .first()
            .map(|l| l.product.price.currency)
            .unwrap_or_default()
    }

    /// Add `quantity` units of `product`.
    ///
    /// Accumulates onto an existing line for the same product, otherwise
    /// appends a new line holding a snapshot of `product`. Returns the
    /// line's new quantity. A new line must be priced in the cart's
    /// currency.
    pub fn add(&mut self, product: &Product, quantity: i64) -> Result<i64, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(format!(
                "{quantity} (must be at least 1)"
            )));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(existing.quantity);
        }

        if !self.lines.is_empty() && product.price.currency != self.currency() {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency().to_string(),
                got: product.price.currency.to_string(),
            });
        }

        self.lines.push(CartLine::new(product.clone(), quantity));
        Ok(quantity)
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product_id() != product_id);
        self.lines.len() < len_before
    }

    /// Set the absolute quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Returns whether the cart
    /// changed; a missing line is left absent.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        match self.lines.iter_mut().find(|l| l.product_id() == product_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Take every line out of the cart, leaving it empty.
    pub fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CommerceError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Cart::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
