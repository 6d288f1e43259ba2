//! stockbook-domain
//!
//! Pure domain models (Product, LedgerEntry, PeriodFilter, reports).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod movement;
pub mod period;
pub mod product;
pub mod report;

pub use movement::*;
pub use period::*;
pub use product::*;
pub use report::*;
