//! Period filters applied to ledger date text before aggregation.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const MONTH_LEN: usize = 7;
const DAY_LEN: usize = 10;

/// Restricts aggregation to rows whose stored date text falls in a month or day.
///
/// Stored dates are never parsed: a row matches when its date text contains
/// the filter value anywhere, so `15/2024-05` and `2024-05-15` both fall in `2024-05`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "scope", content = "value", rename_all = "lowercase")]
pub enum PeriodFilter {
    #[default]
    All,
    Month(String),
    Day(String),
}

impl PeriodFilter {
    /// Validates and builds a `YYYY-MM` filter.
    pub fn month(value: &str) -> Result<Self, PeriodError> {
        let trimmed = value.trim();
        if trimmed.len() != MONTH_LEN
            || NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").is_err()
        {
            return Err(PeriodError::InvalidMonth(value.to_string()));
        }
        Ok(PeriodFilter::Month(trimmed.to_string()))
    }

    /// Validates and builds a `YYYY-MM-DD` filter.
    pub fn day(value: &str) -> Result<Self, PeriodError> {
        let trimmed = value.trim();
        if trimmed.len() != DAY_LEN || NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err() {
            return Err(PeriodError::InvalidDay(value.to_string()));
        }
        Ok(PeriodFilter::Day(trimmed.to_string()))
    }

    pub fn month_of(at: NaiveDateTime) -> Self {
        PeriodFilter::Month(at.format("%Y-%m").to_string())
    }

    pub fn day_of(at: NaiveDateTime) -> Self {
        PeriodFilter::Day(at.format("%Y-%m-%d").to_string())
    }

    pub fn matches(&self, date_text: &str) -> bool {
        match self {
            PeriodFilter::All => true,
            PeriodFilter::Month(value) | PeriodFilter::Day(value) => date_text.contains(value.as_str()),
        }
    }

    /// Label stored alongside persisted reports.
    pub fn label(&self) -> &str {
        match self {
            PeriodFilter::All => "all",
            PeriodFilter::Month(value) | PeriodFilter::Day(value) => value,
        }
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodFilter::All => f.write_str("all time"),
            PeriodFilter::Month(month) => write!(f, "month {month}"),
            PeriodFilter::Day(day) => write!(f, "day {day}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    InvalidMonth(String),
    InvalidDay(String),
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodError::InvalidMonth(value) => {
                write!(f, "invalid month `{value}` (use YYYY-MM)")
            }
            PeriodError::InvalidDay(value) => {
                write!(f, "invalid date `{value}` (use YYYY-MM-DD)")
            }
        }
    }
}

impl std::error::Error for PeriodError {}
