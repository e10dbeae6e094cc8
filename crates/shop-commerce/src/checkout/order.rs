//! Order references and receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, CartTotals};
use crate::ids::OrderReference;

/// Prefix of every order reference.
pub const ORDER_REFERENCE_PREFIX: &str = "ORD-";

/// Issues time-derived order references, unique within a session.
///
/// References are `ORD-<unix millis>`. When two orders land in the same
/// millisecond (or the clock steps backwards) the generator bumps past the
/// last issued value instead of repeating it.
#[derive(Debug, Clone, Default)]
pub struct OrderReferenceGenerator {
    last_millis: Option<i64>,
}

impl OrderReferenceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the reference for an order placed at `now`.
    pub fn next(&mut self, now: DateTime<Utc>) -> OrderReference {
        let mut millis = now.timestamp_millis();
        if let Some(last) = self.last_millis {
            if millis <= last {
                millis = last.saturating_add(1);
            }
        }
        self.last_millis = Some(millis);
        OrderReference::new(format!("{ORDER_REFERENCE_PREFIX}{millis}"))
    }
}

/// Record of a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub reference: OrderReference,
    pub placed_at: DateTime<Utc>,
    /// Cart lines as they were at submission.
    pub lines: Vec<CartLine>,
    /// Totals captured at submission.
    pub totals: CartTotals,
}

impl OrderReceipt {
    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, line| acc.saturating_add(line.quantity))
    }
}
