//! The ledger aggregator behind every report variant.

use std::collections::HashMap;

use stockbook_domain::{
    Direction, FinanceTotals, InventoryLine, LedgerEntry, PeriodFilter, Product, Report,
    ReportKind, TIMESTAMP_FORMAT,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    catalog_service::CatalogService,
    ledger_service::LedgerService,
    records::{encode_report_line, ReportStamp},
    storage::{TabularStore, REPORTS_TABLE},
    time::Clock,
    CoreError,
};

/// A report that has been written to the reports table.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    pub report_id: Uuid,
    pub kind: ReportKind,
    pub period: String,
    pub generated_at: String,
    pub report: Report,
}

pub struct ReportService;

impl ReportService {
    /// Aggregates the ledger in one pass.
    ///
    /// Products appear in the order they are first seen among rows passing `filter`.
    /// Categories come from the catalog (blank for unknown products). Rows with an
    /// unrecognised direction create the product line but add nothing to it.
    /// Quantity sums saturate at the `i64` bounds.
    pub fn aggregate(entries: &[LedgerEntry], products: &[Product], filter: &PeriodFilter) -> Report {
        let categories: HashMap<&str, &Product> = products
            .iter()
            .map(|product| (product.id.as_str(), product))
            .collect();

        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut inventory: Vec<InventoryLine> = Vec::new();
        let (mut purchases, mut sales) = (0.0, 0.0);

        for entry in entries.iter().filter(|entry| filter.matches(&entry.recorded_at)) {
            let id = entry.product_id.as_str();
            let slot = *index.entry(id).or_insert_with(|| {
                let line = match categories.get(id) {
                    Some(product) => InventoryLine::new(
                        id,
                        product.main_category.as_str(),
                        product.sub_category_or_blank(),
                    ),
                    None => InventoryLine::new(id, "", ""),
                };
                inventory.push(line);
                inventory.len() - 1
            });
            let line = &mut inventory[slot];
            let value = entry.value();
            match entry.direction() {
                Some(Direction::In) => {
                    line.received = line.received.saturating_add(entry.quantity);
                    line.remaining = line.remaining.saturating_add(entry.quantity);
                    line.purchase_value += value;
                    purchases += value;
                }
                Some(Direction::Out) => {
                    line.sold = line.sold.saturating_add(entry.quantity);
                    line.remaining = line.remaining.saturating_sub(entry.quantity);
                    line.sales_value += value;
                    sales += value;
                }
                None => {}
            }
        }

        debug!(
            %filter,
            products = inventory.len(),
            purchases,
            sales,
            "report aggregated"
        );
        Report {
            inventory,
            finance: FinanceTotals::new(purchases, sales),
        }
    }

    /// Reads the catalog and ledger and aggregates them under `filter`.
    pub fn load(store: &dyn TabularStore, filter: &PeriodFilter) -> Result<Report, CoreError> {
        let entries = LedgerService::entries(store)?;
        let products = CatalogService::products(store)?;
        Ok(Self::aggregate(&entries, &products, filter))
    }

    /// Resolves the filter for a report variant. A missing period means the current
    /// month (general, monthly) or today (daily).
    pub fn resolve_period(
        clock: &dyn Clock,
        kind: ReportKind,
        period: Option<&str>,
    ) -> Result<(PeriodFilter, String), CoreError> {
        let now = clock.now();
        let period = period.map(str::trim).filter(|value| !value.is_empty());
        match kind {
            ReportKind::General => {
                let label = period
                    .map(str::to_string)
                    .unwrap_or_else(|| now.format("%Y-%m").to_string());
                Ok((PeriodFilter::All, label))
            }
            ReportKind::Monthly => {
                let filter = match period {
                    Some(value) => PeriodFilter::month(value)?,
                    None => PeriodFilter::month_of(now),
                };
                let label = filter.label().to_string();
                Ok((filter, label))
            }
            ReportKind::Daily => {
                let filter = match period {
                    Some(value) => PeriodFilter::day(value)?,
                    None => PeriodFilter::day_of(now),
                };
                let label = filter.label().to_string();
                Ok((filter, label))
            }
        }
    }

    /// Computes a report and appends one row per inventory line to the reports table.
    /// Values are the recorded quantity × price totals of each line.
    pub fn generate(
        store: &dyn TabularStore,
        clock: &dyn Clock,
        kind: ReportKind,
        period: Option<&str>,
    ) -> Result<GeneratedReport, CoreError> {
        let (filter, period) = Self::resolve_period(clock, kind, period)?;
        let report = Self::load(store, &filter)?;
        let report_id = Uuid::new_v4();
        let generated_at = clock.now().format(TIMESTAMP_FORMAT).to_string();
        let id_text = report_id.to_string();
        let stamp = ReportStamp {
            report_type: kind.as_str(),
            period: &period,
            generated_at: &generated_at,
            report_id: &id_text,
        };
        for line in &report.inventory {
            store.append(REPORTS_TABLE, encode_report_line(&stamp, line))?;
        }
        info!(
            report = %report_id,
            %kind,
            period = %period,
            rows = report.inventory.len(),
            "report saved"
        );
        Ok(GeneratedReport {
            report_id,
            kind,
            period,
            generated_at,
            report,
        })
    }
}
