use stockbook_domain::{DashboardSummary, PeriodFilter};
use tracing::debug;

use crate::{
    catalog_service::CatalogService, ledger_service::LedgerService,
    report_service::ReportService, storage::TabularStore, time::Clock, CoreError,
};

pub struct DashboardService;

impl DashboardService {
    /// Current-month movement totals plus the catalog size.
    ///
    /// `total_products` counts catalog rows as stored, blank ids included.
    pub fn summarize(store: &dyn TabularStore, clock: &dyn Clock) -> Result<DashboardSummary, CoreError> {
        let products = CatalogService::products(store)?;
        let entries = LedgerService::entries(store)?;
        let month = PeriodFilter::month_of(clock.now());
        let report = ReportService::aggregate(&entries, &products, &month);

        let summary = DashboardSummary {
            total_products: products.len(),
            monthly_stock_in: report.total_received(),
            monthly_stock_out: report.total_sold(),
            total_purchases: report.finance.purchases,
            total_sales: report.finance.sales,
            balance: report.finance.balance,
        };
        debug!(%month, ?summary, "dashboard summarized");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{storage::MemoryStore, time::FixedClock, StockService};
    use chrono::NaiveDate;
    use stockbook_domain::{Product, StockMovement};

    fn at(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn only_current_month_counts() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(at(2024, 5, 20));
        CatalogService::add_product(&store, Product::new("A", "Tools", None)).unwrap();
        CatalogService::add_product(&store, Product::new("B", "Tools", None)).unwrap();

        StockService::record_movement(&store, &clock, &StockMovement::stock_in("A", 10, 5.0))
            .unwrap();
        StockService::record_movement(&store, &clock, &StockMovement::stock_out("A", 4, 8.0))
            .unwrap();
        clock.set(at(2024, 6, 1));
        StockService::record_movement(&store, &clock, &StockMovement::stock_in("A", 3, 1.0))
            .unwrap();

        clock.set(at(2024, 5, 31));
        let summary = DashboardService::summarize(&store, &clock).unwrap();
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.monthly_stock_in, 10);
        assert_eq!(summary.monthly_stock_out, 4);
        assert_eq!(summary.total_purchases, 50.0);
        assert_eq!(summary.total_sales, 32.0);
        assert_eq!(summary.balance, -18.0);
    }

    #[test]
    fn unavailable_store_is_an_error() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let clock = FixedClock::new(at(2024, 5, 1));
        let err = DashboardService::summarize(&store, &clock).unwrap_err();
        assert!(err.is_store_unavailable());
    }
}
