//! Core of the raw materials inventory
//!
//! Domain models, the stock ledger, filters and the session-backed entity
//! store. The browser build in `wasm/` wraps this crate.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;
pub mod types;
pub mod validation;

pub use crate::config::{ConfigError, StorageKeys, StoreConfig};
pub use dashboard::*;
pub use error::*;
pub use filter::*;
pub use ledger::*;
pub use models::*;
pub use storage::*;
pub use store::*;
pub use types::*;
pub use validation::*;
