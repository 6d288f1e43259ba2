//! Aggregated report shapes derived from the ledger.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Per-product counts accumulated over the filtered ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLine {
    pub id: String,
    pub main_cat: String,
    pub sub_cat: String,
    pub received: i64,
    pub sold: i64,
    pub remaining: i64,
    pub purchase_value: f64,
    pub sales_value: f64,
}

impl InventoryLine {
    pub fn new(id: impl Into<String>, main_cat: impl Into<String>, sub_cat: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            main_cat: main_cat.into(),
            sub_cat: sub_cat.into(),
            received: 0,
            sold: 0,
            remaining: 0,
            purchase_value: 0.0,
            sales_value: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceTotals {
    pub purchases: f64,
    pub sales: f64,
    pub balance: f64,
}

impl FinanceTotals {
    pub fn new(purchases: f64, sales: f64) -> Self {
        Self {
            purchases,
            sales,
            balance: sales - purchases,
        }
    }
}

/// Inventory lines in first-seen ledger order plus global finance totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub inventory: Vec<InventoryLine>,
    pub finance: FinanceTotals,
}

impl Report {
    pub fn line(&self, product_id: &str) -> Option<&InventoryLine> {
        self.inventory.iter().find(|line| line.id == product_id)
    }

    pub fn total_received(&self) -> i64 {
        self.inventory
            .iter()
            .fold(0i64, |total, line| total.saturating_add(line.received))
    }

    pub fn total_sold(&self) -> i64 {
        self.inventory
            .iter()
            .fold(0i64, |total, line| total.saturating_add(line.sold))
    }
}

/// Which report variant a request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    General,
    Monthly,
    Daily,
}

impl ReportKind {
    /// Unrecognised labels fall back to the general report.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => ReportKind::Monthly,
            "daily" => ReportKind::Daily,
            _ => ReportKind::General,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::General => "general",
            ReportKind::Monthly => "monthly",
            ReportKind::Daily => "daily",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current-month figures shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    pub monthly_stock_in: i64,
    pub monthly_stock_out: i64,
    pub total_purchases: f64,
    pub total_sales: f64,
    pub balance: f64,
}

impl DashboardSummary {
    /// Payload returned when the store cannot be reached.
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// Distinct categories found in the catalog, sorted at both levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    pub main_categories: Vec<String>,
    pub sub_categories: BTreeMap<String, Vec<String>>,
}
