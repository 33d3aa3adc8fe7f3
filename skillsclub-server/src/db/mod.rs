//! Database layer - lazily connected pool and catalog queries
//!
//! - One pool per process, injected through `AppState`
//! - Table identifiers come from configuration only; user values are bound
//! - Each operation is a single read query (no transactions)

pub mod catalog;
pub mod pool;
pub mod tables;

pub use catalog::CatalogRepo;
pub use pool::{Database, DEFAULT_MAX_CONNECTIONS};
pub use tables::Tables;
