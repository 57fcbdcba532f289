//! Dropkit reference-data cache
//!
//! Option lists for dropdowns (countries, currencies, states) usually come
//! from slow-changing reference endpoints. [`ReferenceCache`] keeps them
//! fresh for a configurable TTL, collapses concurrent requests for the same
//! key into one fetch, and writes through to a [`SessionStorage`] so later
//! views in the same session skip the network.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use dropkit_cache::{CacheConfig, MemoryStorage, ReferenceCache};
//!
//! # tokio_test_block(async {
//! let cache: ReferenceCache<Vec<String>> = ReferenceCache::new(CacheConfig::default())
//!     .with_storage(Arc::new(MemoryStorage::new()));
//!
//! let countries = cache
//!     .get_or_fetch("countries", || async {
//!         Ok::<_, std::io::Error>(vec!["Canada".to_string(), "France".to_string()])
//!     })
//!     .await
//!     .unwrap();
//! assert_eq!(countries.len(), 2);
//! # });
//! # fn tokio_test_block<F: std::future::Future<Output = ()>>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod cache;
mod config;
mod error;
mod storage;

pub use cache::{PreloadReport, ReferenceCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use storage::{MemoryStorage, SessionStorage};
