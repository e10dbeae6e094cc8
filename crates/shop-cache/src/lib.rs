//! Durable key-value slots for the storefront.
//!
//! Provides a small [`KvStore`] abstraction over byte slots and a typed
//! [`Cache`] wrapper that handles JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use shop_cache::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Line {
//!     id: String,
//!     quantity: i64,
//! }
//!
//! let mut cache = Cache::new(MemoryStore::new());
//!
//! let lines = vec![Line { id: "sku-1".into(), quantity: 2 }];
//! cache.set("cart", &lines).unwrap();
//!
//! let loaded: Option<Vec<Line>> = cache.get("cart").unwrap();
//! assert_eq!(loaded, Some(lines));
//!
//! cache.delete("cart").unwrap();
//! assert!(!cache.exists("cart").unwrap());
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
