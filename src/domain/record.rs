//! A single price observation and the raw row it is built from.

use crate::domain::date_format::{format_opt_date, parse_date};
use crate::domain::error::TickstatsError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

pub const NAME_FIELD: &str = "StockName";
pub const DATE_FIELD: &str = "StockDate";
pub const PRICE_FIELD: &str = "StockPrice";

/// Column name → cell text for one input row. A missing key is an absent field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    /// Cell text for `key`; empty cells count as absent.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl FromIterator<(String, String)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    date: Option<NaiveDate>,
    price: f64,
}

impl Record {
    pub fn new(name: impl Into<String>, date: Option<NaiveDate>, price: f64) -> Self {
        Self {
            name: name.into(),
            date,
            price,
        }
    }

    /// Build a record from a raw row. Absent fields take defaults; present but
    /// unparseable ones are errors.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, TickstatsError> {
        let name = raw.field(NAME_FIELD).unwrap_or_default().to_string();
        let date = raw.field(DATE_FIELD).map(parse_date).transpose()?;
        let price = match raw.field(PRICE_FIELD) {
            Some(text) => parse_price(text)?,
            None => 0.0,
        };
        Ok(Self { name, date, price })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

impl TryFrom<&RawRecord> for Record {
    type Error = TickstatsError;

    fn try_from(raw: &RawRecord) -> Result<Self, Self::Error> {
        Record::from_raw(raw)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}: {} ({:.3})>",
            self.name,
            format_opt_date(self.date),
            self.price
        )
    }
}

fn parse_price(text: &str) -> Result<f64, TickstatsError> {
    let price: f64 = text.parse().map_err(|e| TickstatsError::MalformedPrice {
        value: text.to_string(),
        reason: format!("{e}"),
    })?;
    if !price.is_finite() {
        return Err(TickstatsError::MalformedPrice {
            value: text.to_string(),
            reason: "price must be finite".into(),
        });
    }
    if price < 0.0 {
        return Err(TickstatsError::MalformedPrice {
            value: text.to_string(),
            reason: "price must be non-negative".into(),
        });
    }
    // "-0" parses to negative zero; store it as plain zero.
    Ok(if price == 0.0 { 0.0 } else { price })
}
