use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use stockbook_core::{FixedClock, Inventory, ReportService};
use stockbook_domain::{Categories, LedgerEntry, PeriodFilter, Product, StockMovement};
use stockbook_storage_json::JsonTableStore;
use tempfile::tempdir;

fn sample_catalog(count: usize) -> Vec<Product> {
    (0..count)
        .map(|idx| {
            Product::new(
                format!("P-{idx:04}"),
                format!("Main {}", idx % 7),
                Some(format!("Sub {}", idx % 3)),
            )
        })
        .collect()
}

fn sample_ledger(products: &[Product], entry_count: usize) -> Vec<LedgerEntry> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    (0..entry_count)
        .map(|idx| {
            let product = &products[idx % products.len()];
            let movement = if idx % 4 == 3 {
                StockMovement::stock_out(product.id.clone(), 1, 9.5)
            } else {
                StockMovement::stock_in(product.id.clone(), 3, 4.25)
            };
            let at = start + Duration::hours(idx as i64);
            LedgerEntry::from_movement(&movement, Categories::default(), at)
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let products = sample_catalog(200);
    let entries = sample_ledger(&products, 20_000);
    let month = PeriodFilter::month("2024-03").unwrap();

    c.bench_function("aggregate_all_20k", |b| {
        b.iter(|| ReportService::aggregate(black_box(&entries), &products, &PeriodFilter::All))
    });
    c.bench_function("aggregate_month_20k", |b| {
        b.iter(|| ReportService::aggregate(black_box(&entries), &products, &month))
    });
}

fn bench_json_stock_in(c: &mut Criterion) {
    c.bench_function("json_store_stock_in", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let store = JsonTableStore::new(dir.path()).unwrap();
                let clock = FixedClock::new(
                    NaiveDate::from_ymd_opt(2024, 3, 1)
                        .unwrap()
                        .and_hms_opt(8, 0, 0)
                        .unwrap(),
                );
                let inventory = Inventory::new(Arc::new(store), Arc::new(clock));
                inventory
                    .add_product(Product::new("P-1", "Tools", None))
                    .unwrap();
                (dir, inventory)
            },
            |(_dir, inventory)| {
                for _ in 0..20 {
                    inventory.stock_in("P-1", 1, 2.0).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_aggregate, bench_json_stock_in);
criterion_main!(benches);
