//! Statistics bundle for one ticker over one date window.

use super::date_format::{format_date, format_opt_date};
use super::error::TickstatsError;
use super::record_set::{BuySell, RecordSet};
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub count: usize,
    pub mean: f64,
    /// Absent when the window holds a single record.
    pub stdev: Option<f64>,
    pub buy_sell: BuySell,
}

impl Summary {
    /// Compute statistics over an already filtered window. The window must be non-empty.
    pub fn compute(
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        window: &RecordSet,
    ) -> Result<Self, TickstatsError> {
        let mean = window.mean()?;
        let stdev = match window.stdev() {
            Ok(v) => Some(v),
            Err(TickstatsError::InsufficientRecords { .. }) => None,
            Err(e) => return Err(e),
        };
        let buy_sell = window.buy_sell()?;

        Ok(Self {
            ticker: ticker.to_string(),
            start,
            end,
            count: window.len(),
            mean,
            stdev,
            buy_sell,
        })
    }
}

/// Result of running the get → filter → statistics pipeline for one ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Summary(Summary),
    UnknownTicker {
        ticker: String,
        available: Vec<String>,
    },
    EmptyWindow {
        ticker: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// The ticker exists but none of its records carry a date.
    NoDatedRecords { ticker: String },
}

/// Select `ticker`, narrow it to `[start, end]` and summarize what is left.
/// Empty selections are outcomes, not errors.
pub fn run_query(
    records: &RecordSet,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<QueryOutcome, TickstatsError> {
    let selected = records.get(ticker);
    if selected.is_empty() {
        return Ok(QueryOutcome::UnknownTicker {
            ticker: ticker.to_string(),
            available: records.names(),
        });
    }

    let window = selected.filter(start, end);
    if window.is_empty() {
        return Ok(QueryOutcome::EmptyWindow {
            ticker: ticker.to_string(),
            start,
            end,
        });
    }

    Summary::compute(ticker, start, end, &window).map(QueryOutcome::Summary)
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::Summary(summary) => write!(f, "{summary}"),
            QueryOutcome::UnknownTicker { ticker, available } if available.is_empty() => {
                write!(f, "No records found for {ticker}")
            }
            QueryOutcome::UnknownTicker { ticker, available } => write!(
                f,
                "No records found for {ticker} (available: {})",
                available.join(", ")
            ),
            QueryOutcome::EmptyWindow { ticker, start, end } => write!(
                f,
                "No records for {ticker} between {} and {}",
                format_date(*start),
                format_date(*end)
            ),
            QueryOutcome::NoDatedRecords { ticker } => {
                write!(f, "No dated records for {ticker}")
            }
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} from {} to {} ({} records)",
            self.ticker,
            format_date(self.start),
            format_date(self.end),
            self.count
        )?;
        writeln!(f, "Mean:     {:.3}", self.mean)?;
        match self.stdev {
            Some(sd) => writeln!(f, "Std Dev:  {sd:.3}")?,
            None => writeln!(f, "Std Dev:  n/a (needs at least 2 records)")?,
        }
        writeln!(
            f,
            "Buy:      {} at {:.3}",
            format_opt_date(self.buy_sell.buy_date),
            self.buy_sell.buy_price
        )?;
        writeln!(
            f,
            "Sell:     {} at {:.3}",
            format_opt_date(self.buy_sell.sell_date),
            self.buy_sell.sell_price
        )?;
        write!(f, "Profit:   {:.3}", self.buy_sell.profit)
    }
}
