//! Derived stock levels and validated stock movements.

use stockbook_domain::{Direction, LedgerEntry, StockMovement, MAX_QUANTITY};
use tracing::{info, warn};

use crate::{
    catalog_service::CatalogService,
    ledger_service::LedgerService,
    records::encode_entry,
    storage::{TabularStore, TRANSACTIONS_TABLE},
    time::Clock,
    CoreError,
};

pub struct StockService;

impl StockService {
    /// Sums `in` minus `out` quantities for `product_id` over the whole ledger.
    /// The sum saturates rather than wrapping.
    pub fn current_stock(product_id: &str, entries: &[LedgerEntry]) -> i64 {
        entries
            .iter()
            .filter(|entry| entry.is_for(product_id))
            .fold(0, |stock, entry| match entry.direction() {
                Some(Direction::In) => stock.saturating_add(entry.quantity),
                Some(Direction::Out) => stock.saturating_sub(entry.quantity),
                None => stock,
            })
    }

    /// Reads the ledger and returns the current stock of `product_id`.
    pub fn load_current_stock(store: &dyn TabularStore, product_id: &str) -> Result<i64, CoreError> {
        let entries = LedgerService::entries(store)?;
        Ok(Self::current_stock(product_id, &entries))
    }

    pub fn validate(movement: &StockMovement) -> Result<(), CoreError> {
        if movement.product_id.trim().is_empty() {
            return Err(CoreError::Validation("product id is required".into()));
        }
        if movement.quantity < 0 {
            return Err(CoreError::Validation(format!(
                "quantity must not be negative (got {})",
                movement.quantity
            )));
        }
        if movement.quantity > MAX_QUANTITY {
            return Err(CoreError::Validation(format!(
                "quantity must not exceed {MAX_QUANTITY} (got {})",
                movement.quantity
            )));
        }
        if !movement.unit_price.is_finite() || movement.unit_price < 0.0 {
            return Err(CoreError::Validation(format!(
                "price must be a non-negative number (got {})",
                movement.unit_price
            )));
        }
        Ok(())
    }

    /// Checks the movement against the catalog and the derived stock, then appends
    /// exactly one ledger row.
    pub fn record_movement(
        store: &dyn TabularStore,
        clock: &dyn Clock,
        movement: &StockMovement,
    ) -> Result<LedgerEntry, CoreError> {
        Self::validate(movement)?;
        let product = CatalogService::find(store, &movement.product_id)?
            .ok_or_else(|| CoreError::NotFound(movement.product_id.trim().to_string()))?;

        if movement.direction == Direction::Out {
            let available = Self::load_current_stock(store, &product.id)?;
            if available < movement.quantity {
                warn!(
                    product = %product.id,
                    available,
                    requested = movement.quantity,
                    "stock out rejected"
                );
                return Err(CoreError::InsufficientStock {
                    product_id: product.id,
                    available,
                    requested: movement.quantity,
                });
            }
        }

        let entry = LedgerEntry::from_movement(movement, product.categories(), clock.now());
        store.append(TRANSACTIONS_TABLE, encode_entry(&entry))?;
        info!(
            direction = %movement.direction,
            product = %entry.product_id,
            quantity = entry.quantity,
            price = entry.unit_price,
            "stock movement recorded"
        );
        Ok(entry)
    }
}
