//! Quantity input handling.

use crate::error::CommerceError;

/// Parse a shopper-entered quantity.
///
/// Accepts surrounding whitespace and a leading sign. Anything that is not a
/// whole number is rejected before the cart is touched; the sign is left for
/// the cart operation to judge.
pub fn parse_quantity(input: &str) -> Result<i64, CommerceError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| CommerceError::InvalidQuantity(format!("{trimmed:?} is not a whole number")))
}

/// Bounded quantity picker on the product detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    value: i64,
}

impl QuantityStepper {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    pub fn new() -> Self {
        Self { value: Self::MIN }
    }

    /// Start from a given value, which must lie within the stepper's bounds.
    pub fn with_value(value: i64) -> Result<Self, CommerceError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(CommerceError::InvalidQuantity(format!(
                "{value} (must be between {} and {})",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self { value })
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Step up by one, stopping at the maximum.
    pub fn increment(&mut self) -> i64 {
        if self.value < Self::MAX {
            self.value += 1;
        }
        self.value
    }

    /// Step down by one, stopping at the minimum.
    pub fn decrement(&mut self) -> i64 {
        if self.value > Self::MIN {
            self.value -= 1;
        }
        self.value
    }
}

impl Default for QuantityStepper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity("  12 ").unwrap(), 12);
        assert_eq!(parse_quantity("-2").unwrap(), -2);
        assert_eq!(parse_quantity("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_quantity_rejects_non_integers() {
        for input in ["", "abc", "1.5", "NaN", "2e3", "99999999999999999999"] {
            assert!(
                matches!(parse_quantity(input), Err(CommerceError::InvalidQuantity(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_stepper_bounds() {
        let mut stepper = QuantityStepper::new();
        assert_eq!(stepper.decrement(), 1);

        for _ in 0..20 {
            stepper.increment();
        }
        assert_eq!(stepper.value(), QuantityStepper::MAX);

        assert_eq!(stepper.decrement(), 9);
    }

    #[test]
    fn test_stepper_with_value() {
        assert_eq!(QuantityStepper::with_value(4).unwrap().value(), 4);
        assert!(QuantityStepper::with_value(0).is_err());
        assert!(QuantityStepper::with_value(11).is_err());
    }
}
