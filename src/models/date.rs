//! Calendar date parsing
//!
//! Dates are plain `NaiveDate` values with no time zone attached, so a
//! `YYYY-MM-DD` string always denotes the same calendar day on every host.

use chrono::NaiveDate;

use crate::error::{DriverbookError, DriverbookResult};

/// Storage and input format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into a calendar date
pub fn parse_date(s: &str) -> DriverbookResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| DriverbookError::Parse(format!("Invalid date '{}' (expected YYYY-MM-DD): {}", s, e)))
}
