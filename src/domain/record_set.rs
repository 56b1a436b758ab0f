//! Ordered, queryable collection of records.
//!
//! Every query returns a fresh `RecordSet`; the receiver is never mutated.
//! Date ordering treats a missing date as earlier than any present date, and
//! all sorts are stable, so equal keys keep their prior relative order.

use crate::domain::error::TickstatsError;
use crate::domain::record::Record;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

/// Round to three decimal places. Values too large to scale are returned as is.
pub fn round3(value: f64) -> f64 {
    let scaled = value * 1000.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 1000.0
}

/// Lowest- and highest-priced records of a set and the naive profit between them.
#[derive(Debug, Clone, PartialEq)]
pub struct BuySell {
    pub buy_date: Option<NaiveDate>,
    pub buy_price: f64,
    pub sell_date: Option<NaiveDate>,
    pub sell_price: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose name matches exactly, ordered by ascending date.
    pub fn get(&self, name: &str) -> RecordSet {
        let matching: Vec<Record> = self
            .records
            .iter()
            .filter(|r| r.name() == name)
            .cloned()
            .collect();
        RecordSet::new(matching).order(false, false)
    }

    /// Stable sort by price when `by_price`, otherwise by date; ascending unless `desc`.
    pub fn order(&self, desc: bool, by_price: bool) -> RecordSet {
        let mut records = self.records.clone();
        let cmp = |a: &Record, b: &Record| -> Ordering {
            if by_price {
                a.price().total_cmp(&b.price())
            } else {
                a.date().cmp(&b.date())
            }
        };
        if desc {
            records.sort_by(|a, b| cmp(b, a));
        } else {
            records.sort_by(cmp);
        }
        RecordSet::new(records)
    }

    /// Records dated within `[start, end]`. Dateless records never match.
    pub fn filter(&self, start: NaiveDate, end: NaiveDate) -> RecordSet {
        let matching = self
            .records
            .iter()
            .filter(|r| r.date().is_some_and(|d| start <= d && d <= end))
            .cloned()
            .collect();
        RecordSet::new(matching)
    }

    pub fn mean(&self) -> Result<f64, TickstatsError> {
        if self.is_empty() {
            return Err(TickstatsError::EmptyRecordSet { operation: "mean" });
        }
        Ok(round3(self.raw_mean()))
    }

    /// Sample standard deviation (N-1 denominator).
    pub fn stdev(&self) -> Result<f64, TickstatsError> {
        let n = self.len();
        if n < 2 {
            return Err(TickstatsError::InsufficientRecords {
                operation: "stdev",
                have: n,
                need: 2,
            });
        }
        let sd = self.scaled_stdev(1.0);
        if sd.is_finite() {
            return Ok(round3(sd));
        }
        // Squares of very large prices overflow; work in units of the largest price.
        let max = self.iter().map(|r| r.price()).fold(0.0, f64::max);
        Ok(round3(self.scaled_stdev(max) * max))
    }

    /// Buy at the cheapest record, sell at the dearest, regardless of which came first.
    pub fn buy_sell(&self) -> Result<BuySell, TickstatsError> {
        let ordered = self.order(false, true);
        let (buy, sell) = match (ordered.records.first(), ordered.records.last()) {
            (Some(buy), Some(sell)) => (buy, sell),
            _ => {
                return Err(TickstatsError::EmptyRecordSet {
                    operation: "buy_sell",
                });
            }
        };
        let profit = (sell.price() - buy.price()) * 100.0;
        if !profit.is_finite() {
            return Err(TickstatsError::NumericOverflow {
                operation: "buy_sell",
            });
        }
        Ok(BuySell {
            buy_date: buy.date(),
            buy_price: buy.price(),
            sell_date: sell.date(),
            sell_price: sell.price(),
            profit: round3(profit),
        })
    }

    /// Distinct non-empty names in order of first appearance.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for r in &self.records {
            if !r.name().is_empty() && !names.iter().any(|n| n == r.name()) {
                names.push(r.name().to_string());
            }
        }
        names
    }

    /// Earliest and latest present dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().filter_map(|r| r.date()).min()?;
        let max = self.records.iter().filter_map(|r| r.date()).max()?;
        Some((min, max))
    }

    fn raw_mean(&self) -> f64 {
        mean_of(self.iter().map(|r| r.price()))
    }

    /// Sample standard deviation of `price / scale`. Needs at least two records.
    fn scaled_stdev(&self, scale: f64) -> f64 {
        if scale == 0.0 {
            return 0.0;
        }
        let prices = || self.iter().map(move |r| r.price() / scale);
        let mean = mean_of(prices());
        let sum_sq: f64 = prices()
            .map(|p| {
                let diff = p - mean;
                diff * diff
            })
            .sum();
        (sum_sq / (self.len() - 1) as f64).sqrt()
    }
}

/// Arithmetic mean, falling back to a running mean when the plain sum overflows.
fn mean_of<I>(values: I) -> f64
where
    I: Iterator<Item = f64> + Clone,
{
    let (sum, n) = values.clone().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        return 0.0;
    }
    if sum.is_finite() {
        return sum / n as f64;
    }
    values
        .enumerate()
        .fold(0.0, |m, (i, v)| m + (v - m) / (i + 1) as f64)
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<RecordSet: [")?;
        for (i, r) in self.records.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{r}")?;
        }
        write!(f, "]>")
    }
}
