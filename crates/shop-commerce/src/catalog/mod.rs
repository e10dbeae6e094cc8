//! Product catalog module.
//!
//! Contains the read-only product records and catalog browsing
//! (filtering, search, sorting).

mod catalog;
mod product;
mod query;

pub use catalog::{Catalog, ProductCatalog};
pub use product::{Product, ProductBadge, StarRating, MAX_RATING};
pub use query::{CatalogQuery, SortOption};
