//! Storefront domain types and logic.
//!
//! - **Catalog**: read-only products, filtering, search and sorting
//! - **Cart**: cart lines, derived totals and the persisted [`CartStore`]
//! - **Checkout**: order references and receipts
//!
//! # Example
//!
//! ```rust
//! use shop_commerce::prelude::*;
//! use shop_cache::MemoryStore;
//!
//! let catalog = Catalog::new(vec![Product::new(
//!     "sku-1",
//!     "USB-C Cable",
//!     Money::new(4000, Currency::USD),
//! )])
//! .unwrap();
//!
//! let mut store = CartStore::builder(catalog, MemoryStore::new()).open();
//! store.add_item(&ProductId::new("sku-1"), 2).unwrap();
//!
//! let totals = store.totals().unwrap();
//! assert_eq!(totals.subtotal.display(), "$80.00");
//! assert_eq!(totals.shipping.display(), "$15.00");
//! assert_eq!(totals.tax.display(), "$6.40");
//! assert_eq!(totals.total.display(), "$101.40");
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod notify;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::CartStore;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::notify::{Notifier, NullNotifier, Severity};

    // Catalog
    pub use crate::catalog::{
        Catalog, CatalogQuery, Product, ProductBadge, ProductCatalog, SortOption, StarRating,
    };

    // Cart
    pub use crate::cart::{
        parse_quantity, Cart, CartLine, CartStore, CartStoreBuilder, CartTotals, CartView,
        PricingPolicy, QuantityStepper, DEFAULT_CART_KEY,
    };

    // Checkout
    pub use crate::checkout::{OrderReceipt, OrderReference, OrderReferenceGenerator};
}
