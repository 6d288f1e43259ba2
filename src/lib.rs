#![doc(test(attr(deny(warnings))))]

//! Stockbook tracks products, stock movements and reports on top of a tabular store,
//! and exposes them through an HTTP API and an interactive command shell.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod errors;
pub mod utils;

pub use errors::AppError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_with_filter(None);
}

/// Like [`init`], with an extra default directive (usually the config's `log_filter`).
/// `RUST_LOG` still takes precedence.
pub fn init_with_filter(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("Stockbook tracing initialized.");
    });
}
