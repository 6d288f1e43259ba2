//! Stable, public-facing entry point that wraps the service layer.
//!
//! Frontends (HTTP, CLI) hold one `Inventory` and never talk to the services
//! or the store directly.

use std::sync::{Arc, Mutex, MutexGuard};

use stockbook_domain::{
    CategoryTree, DashboardSummary, Direction, LedgerEntry, PeriodFilter, Product, ProductStock,
    Report, ReportKind, StockMovement,
};
use tracing::warn;

use crate::{
    catalog_service::CatalogService, dashboard_service::DashboardService,
    ledger_service::LedgerService, report_service::{GeneratedReport, ReportService},
    stock_service::StockService, storage::TabularStore, time::Clock, CoreError,
};

/// Shared handle over a tabular store and a clock.
pub struct Inventory {
    store: Arc<dyn TabularStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl Inventory {
    pub fn new(store: Arc<dyn TabularStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &dyn TabularStore {
        self.store.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Serializes every read-check-write sequence issued through this handle.
    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current_stock(&self, product_id: &str) -> Result<i64, CoreError> {
        StockService::load_current_stock(self.store(), product_id)
    }

    /// Records a movement. The stock check and the append observe the same ledger.
    pub fn record_movement(&self, movement: &StockMovement) -> Result<LedgerEntry, CoreError> {
        let _guard = self.write_guard();
        StockService::record_movement(self.store(), self.clock(), movement)
    }

    pub fn stock_in(&self, product_id: &str, quantity: i64, unit_price: f64) -> Result<LedgerEntry, CoreError> {
        self.record_movement(&StockMovement::stock_in(product_id, quantity, unit_price))
    }

    pub fn stock_out(&self, product_id: &str, quantity: i64, unit_price: f64) -> Result<LedgerEntry, CoreError> {
        self.record_movement(&StockMovement::stock_out(product_id, quantity, unit_price))
    }

    pub fn entries(&self) -> Result<Vec<LedgerEntry>, CoreError> {
        LedgerService::entries(self.store())
    }

    pub fn movements(&self, direction: Direction) -> Result<Vec<LedgerEntry>, CoreError> {
        Ok(LedgerService::movements(&self.entries()?, direction))
    }

    pub fn report(&self, filter: &PeriodFilter) -> Result<Report, CoreError> {
        ReportService::load(self.store(), filter)
    }

    /// Report for `kind`, resolving a missing period the same way `generate_report` does.
    pub fn report_for(&self, kind: ReportKind, period: Option<&str>) -> Result<(Report, String), CoreError> {
        let (filter, label) = ReportService::resolve_period(self.clock(), kind, period)?;
        Ok((self.report(&filter)?, label))
    }

    pub fn generate_report(&self, kind: ReportKind, period: Option<&str>) -> Result<GeneratedReport, CoreError> {
        let _guard = self.write_guard();
        ReportService::generate(self.store(), self.clock(), kind, period)
    }

    pub fn dashboard(&self) -> Result<DashboardSummary, CoreError> {
        DashboardService::summarize(self.store(), self.clock())
    }

    /// Dashboard that degrades to zeroes when the store cannot be read.
    pub fn dashboard_or_zeroed(&self) -> (DashboardSummary, Option<CoreError>) {
        match self.dashboard() {
            Ok(summary) => (summary, None),
            Err(err) => {
                warn!(error = %err, "dashboard degraded");
                (DashboardSummary::zeroed(), Some(err))
            }
        }
    }

    /// Products with a non-blank id and their current stock.
    pub fn products(&self) -> Result<Vec<ProductStock>, CoreError> {
        CatalogService::list_with_stock(self.store())
    }

    /// Every catalog row, blank ids included, with its current stock.
    pub fn stock_levels(&self) -> Result<Vec<ProductStock>, CoreError> {
        CatalogService::stock_levels(self.store())
    }

    pub fn catalog(&self) -> Result<Vec<Product>, CoreError> {
        CatalogService::products(self.store())
    }

    pub fn add_product(&self, product: Product) -> Result<Product, CoreError> {
        let _guard = self.write_guard();
        CatalogService::add_product(self.store(), product)
    }

    pub fn delete_product(&self, product_id: &str) -> Result<Product, CoreError> {
        let _guard = self.write_guard();
        CatalogService::delete_product(self.store(), product_id)
    }

    pub fn categories(&self) -> Result<CategoryTree, CoreError> {
        CatalogService::categories(self.store())
    }

    pub fn update_categories(
        &self,
        product_id: &str,
        main_category: &str,
        sub_category: Option<String>,
    ) -> Result<Product, CoreError> {
        let _guard = self.write_guard();
        CatalogService::update_categories(self.store(), product_id, main_category, sub_category)
    }

    pub fn clear_main_category(&self, name: &str) -> Result<usize, CoreError> {
        let _guard = self.write_guard();
        CatalogService::clear_main_category(self.store(), name)
    }

    pub fn clear_sub_category(&self, main: &str, sub: &str) -> Result<usize, CoreError> {
        let _guard = self.write_guard();
        CatalogService::clear_sub_category(self.store(), main, sub)
    }

    /// Reachability check behind the health endpoint.
    pub fn ping(&self) -> Result<(), CoreError> {
        CatalogService::products(self.store()).map(|_| ())
    }
}
