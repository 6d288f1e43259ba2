//! Text views of inventory data used by the shell commands.

use stockbook_domain::{CategoryTree, DashboardSummary, LedgerEntry, ProductStock, Report};

use crate::cli::table::{Table, TableColumn};

pub fn format_money(value: f64, currency: &str) -> String {
    format!("{:.2} {}", value, currency)
}

pub fn render_products(products: &[ProductStock]) -> String {
    if products.is_empty() {
        return "No products yet.".to_string();
    }
    let mut table = Table::new(vec![
        TableColumn::left("ID").max_width(24),
        TableColumn::left("Main"),
        TableColumn::left("Sub"),
        TableColumn::right("Stock"),
    ]);
    for row in products {
        table.push_row(vec![
            row.product.id.clone(),
            row.product.main_category.clone(),
            row.product.sub_category_or_blank().to_string(),
            row.current_stock.to_string(),
        ]);
    }
    table.render()
}

pub fn render_ledger(entries: &[LedgerEntry], currency: &str) -> String {
    if entries.is_empty() {
        return "No movements recorded.".to_string();
    }
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::left("Product"),
        TableColumn::right("Qty"),
        TableColumn::right("Price"),
        TableColumn::left("Main"),
        TableColumn::left("Sub"),
    ]);
    for entry in entries {
        table.push_row(vec![
            entry.recorded_at.clone(),
            entry.kind.to_string(),
            entry.product_id.clone(),
            entry.quantity.to_string(),
            format_money(entry.unit_price, currency),
            entry.main_category.clone(),
            entry.sub_category.clone(),
        ]);
    }
    table.render()
}

/// Inventory table followed by the finance totals.
pub fn render_report(report: &Report, currency: &str) -> String {
    let mut out = String::new();
    if report.inventory.is_empty() {
        out.push_str("No movements in this period.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Product"),
            TableColumn::left("Main"),
            TableColumn::left("Sub"),
            TableColumn::right("In"),
            TableColumn::right("Out"),
            TableColumn::right("Left"),
            TableColumn::right("Purchases"),
            TableColumn::right("Sales"),
        ]);
        for line in &report.inventory {
            table.push_row(vec![
                line.id.clone(),
                line.main_cat.clone(),
                line.sub_cat.clone(),
                line.received.to_string(),
                line.sold.to_string(),
                line.remaining.to_string(),
                format!("{:.2}", line.purchase_value),
                format!("{:.2}", line.sales_value),
            ]);
        }
        out.push_str(&table.render());
    }

    out.push_str("\n\n");
    out.push_str(&format!(
        "Purchases: {}\n",
        format_money(report.finance.purchases, currency)
    ));
    out.push_str(&format!(
        "Sales:     {}\n",
        format_money(report.finance.sales, currency)
    ));
    out.push_str(&format!(
        "Balance:   {}",
        format_money(report.finance.balance, currency)
    ));
    out
}

pub fn render_dashboard(summary: &DashboardSummary, currency: &str) -> String {
    [
        format!("Products:          {}", summary.total_products),
        format!("Stock in (month):  {}", summary.monthly_stock_in),
        format!("Stock out (month): {}", summary.monthly_stock_out),
        format!(
            "Purchases:         {}",
            format_money(summary.total_purchases, currency)
        ),
        format!(
            "Sales:             {}",
            format_money(summary.total_sales, currency)
        ),
        format!(
            "Balance:           {}",
            format_money(summary.balance, currency)
        ),
    ]
    .join("\n")
}

pub fn render_categories(tree: &CategoryTree) -> String {
    if tree.main_categories.is_empty() {
        return "No categories yet.".to_string();
    }
    let mut lines = Vec::new();
    for main in &tree.main_categories {
        lines.push(main.clone());
        if let Some(subs) = tree.sub_categories.get(main) {
            lines.extend(subs.iter().map(|sub| format!("  - {sub}")));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use stockbook_domain::{FinanceTotals, InventoryLine, Product};

    use super::*;

    #[test]
    fn money_uses_two_decimals() {
        assert_eq!(format_money(12.5, "USD"), "12.50 USD");
        assert_eq!(format_money(-3.0, "EUR"), "-3.00 EUR");
    }

    #[test]
    fn empty_report_still_shows_totals() {
        let rendered = render_report(&Report::default(), "USD");
        assert!(rendered.starts_with("No movements in this period."));
        assert!(rendered.ends_with("Balance:   0.00 USD"));
    }

    #[test]
    fn report_lists_each_line() {
        let mut line = InventoryLine::new("P-1", "Tools", "Hand");
        line.received = 3;
        line.remaining = 3;
        line.purchase_value = 30.0;
        let report = Report {
            inventory: vec![line],
            finance: FinanceTotals::new(30.0, 0.0),
        };
        let rendered = render_report(&report, "USD");
        assert!(rendered.contains("P-1"));
        assert!(rendered.contains("30.00"));
        assert!(rendered.contains("Balance:   -30.00 USD"));
    }

    #[test]
    fn categories_nest_subs_under_mains() {
        let mut subs = BTreeMap::new();
        subs.insert("Tools".to_string(), vec!["Hand".to_string(), "Power".to_string()]);
        let tree = CategoryTree {
            main_categories: vec!["Paint".to_string(), "Tools".to_string()],
            sub_categories: subs,
        };
        assert_eq!(
            render_categories(&tree),
            "Paint\nTools\n  - Hand\n  - Power"
        );
    }

    #[test]
    fn products_show_blank_sub_category() {
        let rows = vec![ProductStock {
            product: Product::new("P-1", "Tools", None),
            current_stock: 4,
        }];
        let rendered = render_products(&rows);
        assert!(rendered.lines().nth(2).is_some_and(|line| line.ends_with('4')));
    }
}
