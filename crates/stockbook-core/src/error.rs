use std::io;

use stockbook_domain::PeriodError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Not enough stock available for {product_id}! Current: {available}, Required: {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Product ID already exists: {0}")]
    DuplicateProduct(String),
}

impl CoreError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, CoreError::StoreUnavailable(_))
    }
}

impl From<io::Error> for CoreError {
    fn from(err: io::Error) -> Self {
        CoreError::StoreUnavailable(err.to_string())
    }
}

impl From<PeriodError> for CoreError {
    fn from(err: PeriodError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
