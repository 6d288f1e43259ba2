//! Typed decoding and encoding of table rows.
//!
//! All header-keyed access happens here so that services only ever see
//! [`Product`] and [`LedgerEntry`] values. Missing or malformed fields decode to
//! explicit defaults: blank text, or zero for numbers.

use stockbook_domain::{EntryKind, InventoryLine, LedgerEntry, Product, MAX_QUANTITY};

use crate::storage::Record;

pub const COL_ID: &str = "ID";
pub const COL_MAIN_CATEGORY: &str = "Main Category";
pub const COL_SUB_CATEGORY: &str = "Sub Category";

pub const COL_TYPE: &str = "Type";
pub const COL_PRODUCT_ID: &str = "Product ID";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_PRICE: &str = "Price";
pub const COL_SELLING_PRICE: &str = "Selling Price";
pub const COL_DATE: &str = "Date";

pub const COL_REPORT_TYPE: &str = "Report Type";
pub const COL_PERIOD: &str = "Period";
pub const COL_RECEIVED: &str = "Received";
pub const COL_SOLD: &str = "Sold";
pub const COL_REMAINING: &str = "Remaining";
pub const COL_PURCHASE_VALUE: &str = "Purchase Value";
pub const COL_SALES_VALUE: &str = "Sales Value";
pub const COL_GENERATED_AT: &str = "Generated At";
pub const COL_REPORT_ID: &str = "Report ID";

/// Parses a quantity cell. Decimal text is truncated toward zero; anything
/// unparseable or beyond [`MAX_QUANTITY`] is zero.
pub fn parse_quantity(raw: &str) -> i64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value.trunc().abs() <= MAX_QUANTITY as f64 => {
            value.trunc() as i64
        }
        _ => 0,
    }
}

/// Parses a price cell; anything unparseable is zero.
pub fn parse_price(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

pub fn decode_product(record: &Record) -> Product {
    let sub = record.get(COL_SUB_CATEGORY).trim();
    Product {
        id: record.get(COL_ID).trim().to_string(),
        main_category: record.get(COL_MAIN_CATEGORY).trim().to_string(),
        sub_category: (!sub.is_empty()).then(|| sub.to_string()),
    }
}

pub fn encode_product(product: &Product) -> Record {
    Record::new()
        .with(COL_ID, product.id.as_str())
        .with(COL_MAIN_CATEGORY, product.main_category.as_str())
        .with(COL_SUB_CATEGORY, product.sub_category_or_blank())
}

pub fn decode_entry(record: &Record) -> LedgerEntry {
    let price = match record.get(COL_PRICE).trim() {
        "" => record.get(COL_SELLING_PRICE),
        value => value,
    };
    LedgerEntry {
        kind: EntryKind::from(record.get(COL_TYPE).trim().to_string()),
        product_id: record.get(COL_PRODUCT_ID).trim().to_string(),
        quantity: parse_quantity(record.get(COL_QUANTITY)),
        unit_price: parse_price(price),
        recorded_at: record.get(COL_DATE).trim().to_string(),
        main_category: record.get(COL_MAIN_CATEGORY).trim().to_string(),
        sub_category: record.get(COL_SUB_CATEGORY).trim().to_string(),
    }
}

pub fn encode_entry(entry: &LedgerEntry) -> Record {
    Record::new()
        .with(COL_TYPE, entry.kind.to_string())
        .with(COL_PRODUCT_ID, entry.product_id.as_str())
        .with(COL_QUANTITY, entry.quantity.to_string())
        .with(COL_PRICE, entry.unit_price.to_string())
        .with(COL_DATE, entry.recorded_at.as_str())
        .with(COL_MAIN_CATEGORY, entry.main_category.as_str())
        .with(COL_SUB_CATEGORY, entry.sub_category.as_str())
}

/// Header and metadata shared by every row of one persisted report.
#[derive(Debug, Clone)]
pub struct ReportStamp<'a> {
    pub report_type: &'a str,
    pub period: &'a str,
    pub generated_at: &'a str,
    pub report_id: &'a str,
}

pub fn encode_report_line(stamp: &ReportStamp<'_>, line: &InventoryLine) -> Record {
    Record::new()
        .with(COL_REPORT_TYPE, stamp.report_type)
        .with(COL_PERIOD, stamp.period)
        .with(COL_PRODUCT_ID, line.id.as_str())
        .with(COL_MAIN_CATEGORY, line.main_cat.as_str())
        .with(COL_RECEIVED, line.received.to_string())
        .with(COL_SOLD, line.sold.to_string())
        .with(COL_REMAINING, line.remaining.to_string())
        .with(COL_PURCHASE_VALUE, line.purchase_value.to_string())
        .with(COL_SALES_VALUE, line.sales_value.to_string())
        .with(COL_GENERATED_AT, stamp.generated_at)
        .with(COL_SUB_CATEGORY, line.sub_cat.as_str())
        .with(COL_REPORT_ID, stamp.report_id)
}
