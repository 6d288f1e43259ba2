//! Ledger entries and stock movement requests.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::product::Categories;

/// Text format used for ledger timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest quantity a single movement may carry. Stored rows above it decode as
/// malformed, which keeps ledger sums well inside `i64`.
pub const MAX_QUANTITY: i64 = 1_000_000_000_000;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Parses `in`/`out`, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("in") {
            Some(Direction::In)
        } else if trimmed.eq_ignore_ascii_case("out") {
            Some(Direction::Out)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction column of a stored ledger row. Unrecognised text is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryKind {
    Movement(Direction),
    Other(String),
}

impl EntryKind {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            EntryKind::Movement(direction) => Some(*direction),
            EntryKind::Other(_) => None,
        }
    }
}

impl From<String> for EntryKind {
    fn from(value: String) -> Self {
        match Direction::parse(&value) {
            Some(direction) => EntryKind::Movement(direction),
            None => EntryKind::Other(value),
        }
    }
}

impl From<EntryKind> for String {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Movement(direction) => direction.as_str().to_string(),
            EntryKind::Other(raw) => raw,
        }
    }
}

impl From<Direction> for EntryKind {
    fn from(direction: Direction) -> Self {
        EntryKind::Movement(direction)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Movement(direction) => direction.fmt(f),
            EntryKind::Other(raw) => f.write_str(raw),
        }
    }
}

/// One append-only row of the transaction ledger.
///
/// Categories are the values captured when the row was written; they are not
/// refreshed when the catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub recorded_at: String,
    pub main_category: String,
    pub sub_category: String,
}

impl LedgerEntry {
    /// Builds the entry for an accepted movement.
    pub fn from_movement(
        movement: &StockMovement,
        categories: Categories,
        recorded_at: NaiveDateTime,
    ) -> Self {
        Self {
            kind: EntryKind::Movement(movement.direction),
            product_id: movement.product_id.trim().to_string(),
            quantity: movement.quantity,
            unit_price: movement.unit_price,
            recorded_at: recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            main_category: categories.main,
            sub_category: categories.sub,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        self.kind.direction()
    }

    pub fn is_for(&self, product_id: &str) -> bool {
        self.product_id.trim() == product_id.trim()
    }

    /// Quantity multiplied by the recorded unit price.
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// A request to move stock in or out of the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub direction: Direction,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl StockMovement {
    pub fn new(
        direction: Direction,
        product_id: impl Into<String>,
        quantity: i64,
        unit_price: f64,
    ) -> Self {
        Self {
            direction,
            product_id: product_id.into(),
            quantity,
            unit_price,
        }
    }

    pub fn stock_in(product_id: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self::new(Direction::In, product_id, quantity, unit_price)
    }

    pub fn stock_out(product_id: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self::new(Direction::Out, product_id, quantity, unit_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn direction_parse_is_case_insensitive() {
        assert_eq!(Direction::parse(" IN "), Some(Direction::In));
        assert_eq!(Direction::parse("Out"), Some(Direction::Out));
        assert_eq!(Direction::parse("transfer"), None);
    }

    #[test]
    fn entry_kind_keeps_unknown_text() {
        let kind = EntryKind::from("adjust".to_string());
        assert_eq!(kind, EntryKind::Other("adjust".into()));
        assert_eq!(String::from(kind), "adjust");
        let json = serde_json::to_string(&EntryKind::Movement(Direction::Out)).unwrap();
        assert_eq!(json, "\"out\"");
    }

    #[test]
    fn entry_from_movement_stamps_timestamp_and_categories() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let movement = StockMovement::stock_in(" A ", 3, 2.5);
        let entry = LedgerEntry::from_movement(
            &movement,
            Categories {
                main: "Tools".into(),
                sub: String::new(),
            },
            at,
        );
        assert_eq!(entry.product_id, "A");
        assert_eq!(entry.recorded_at, "2024-05-15 09:00:00");
        assert_eq!(entry.main_category, "Tools");
        assert_eq!(entry.value(), 7.5);
    }
}
