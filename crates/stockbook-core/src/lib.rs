//! stockbook-core
//!
//! Business logic and services for Stockbook.
//! Depends on stockbook-domain. No CLI, no HTTP, no file formats; storage is reached
//! only through the `TabularStore` trait.

pub mod catalog_service;
pub mod dashboard_service;
pub mod error;
pub mod inventory;
pub mod ledger_service;
pub mod records;
pub mod report_service;
pub mod stock_service;
pub mod storage;
pub mod time;

pub use catalog_service::*;
pub use dashboard_service::*;
pub use error::CoreError;
pub use inventory::Inventory;
pub use ledger_service::*;
pub use report_service::*;
pub use stock_service::*;
pub use storage::{MemoryStore, Record, Table, TabularStore};
pub use time::{Clock, FixedClock};
