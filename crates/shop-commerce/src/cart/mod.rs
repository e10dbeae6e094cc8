//! Shopping cart module.
//!
//! Contains cart lines, derived totals, quantity input handling and the
//! persisted cart store.

mod cart;
mod pricing;
mod quantity;
mod store;

pub use cart::{Cart, CartLine};
pub use pricing::{CartTotals, PricingPolicy};
pub use quantity::{parse_quantity, QuantityStepper};
pub use store::{CartStore, CartStoreBuilder, CartView, DEFAULT_CART_KEY};
