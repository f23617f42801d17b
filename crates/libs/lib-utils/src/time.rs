//! # Time Utilities
//!
//! Clock and calendar-date helpers using chrono.

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(date: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| Error::FailToDateParse(date.to_string()))
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToDateParse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
