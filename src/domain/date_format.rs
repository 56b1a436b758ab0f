//! The `DD-Mon-YYYY` date format shared by input files and user-entered bounds.

use crate::domain::error::TickstatsError;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%d-%b-%Y";

/// Parse a `DD-Mon-YYYY` date such as `20-Jan-2019`.
pub fn parse_date(value: &str) -> Result<NaiveDate, TickstatsError> {
    let text = value.trim();
    // %Y alone also takes signed years and any digit count.
    let year = text.rsplit('-').next().unwrap_or_default();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TickstatsError::MalformedDate {
            value: value.to_string(),
            reason: "year must be four digits (expected DD-Mon-YYYY)".into(),
        });
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| {
        TickstatsError::MalformedDate {
            value: value.to_string(),
            reason: format!("{e} (expected DD-Mon-YYYY)"),
        }
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format an optional date, rendering an absent one as `None`.
pub fn format_opt_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "None".to_string())
}
