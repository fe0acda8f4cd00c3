//! Inclusive calendar date ranges
//!
//! Dates are ISO-8601 calendar days (`YYYY-MM-DD`) kept as strings. All
//! comparisons are lexicographic, which orders correctly only for that exact
//! format. The matcher never validates; records entering through the CLI are
//! checked with [`DateRange::parse`] first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Format every stored date must follow
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum DateError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    Malformed(String),

    #[error("Date range ends before it starts: {start} > {end}")]
    Inverted { start: String, end: String },
}

/// Checks that a string is a real `YYYY-MM-DD` calendar date
pub fn validate_day(value: &str) -> Result<(), DateError> {
    // chrono accepts unpadded fields, which would break lexicographic order
    if value.len() != 10 {
        return Err(DateError::Malformed(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| DateError::Malformed(value.to_string()))
}

/// An inclusive `[start, end]` range of calendar days
///
/// Serialized as `start_date` / `end_date` so records can flatten it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "start_date")]
    pub start: String,
    #[serde(rename = "end_date")]
    pub end: String,
}

impl DateRange {
    /// Builds a range without any checks
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Builds a range from user input, requiring well-formed dates and start <= end
    pub fn parse(start: &str, end: &str) -> Result<Self, DateError> {
        let start = start.trim();
        let end = end.trim();
        validate_day(start)?;
        validate_day(end)?;

        if start > end {
            return Err(DateError::Inverted {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self::new(start, end))
    }

    /// True if `inner` lies entirely within this range
    pub fn contains(&self, inner: &DateRange) -> bool {
        inner.start >= self.start && inner.end <= self.end
    }

    /// True unless one range ends strictly before the other starts
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !(self.end < other.start || self.start > other.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}..{}", self.start, self.end))
    }
}
