//! Checkout module.
//!
//! Order placement is simulated: submitting produces a receipt and empties
//! the cart, with no payment or fulfillment behind it.

mod order;

pub use order::{OrderReceipt, OrderReferenceGenerator, ORDER_REFERENCE_PREFIX};

pub use crate::ids::OrderReference;
