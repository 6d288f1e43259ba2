mod common;

use std::sync::Arc;

use stockbook::cli::render::render_report;
use stockbook_core::{FixedClock, Inventory, MemoryStore};
use stockbook_domain::{PeriodFilter, Product};

#[test]
fn general_report_view() {
    let clock = FixedClock::new(common::at("2024-03-15", "10:00:00"));
    let inventory = Inventory::new(Arc::new(MemoryStore::new()), Arc::new(clock));
    inventory
        .add_product(Product::new("P-1", "Tools", Some("Hand".into())))
        .unwrap();
    inventory
        .add_product(Product::new("P-22", "Paint", None))
        .unwrap();
    inventory.stock_in("P-1", 10, 5.0).unwrap();
    inventory.stock_out("P-1", 4, 8.0).unwrap();
    inventory.stock_in("P-22", 3, 1.5).unwrap();

    let report = inventory.report(&PeriodFilter::All).unwrap();
    let view = format!("report (USD):\n{}", render_report(&report, "USD"));
    insta::assert_snapshot!("general_report_view", view);
}
