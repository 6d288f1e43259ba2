pub mod category;
pub mod config;
pub mod dashboard;
pub mod product;
pub mod report;
pub mod stock;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        product::definitions(),
        category::definitions(),
        stock::definitions(),
        report::definitions(),
        dashboard::definitions(),
        config::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

/// Whole units; fractional input is truncated toward zero.
pub(crate) fn parse_quantity(raw: &str) -> Result<i64, CommandError> {
    let value = parse_number(raw, "quantity")?;
    Ok(value.trunc() as i64)
}

pub(crate) fn parse_price(raw: &str) -> Result<f64, CommandError> {
    parse_number(raw, "price")
}

fn parse_number(raw: &str, field: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("invalid {field}: `{raw}`")))
}
