#![allow(dead_code)]

use chrono::NaiveDate;
use std::io::Write;
use tickstats::domain::record::{DATE_FIELD, NAME_FIELD, PRICE_FIELD, RawRecord, Record};
use tickstats::domain::record_set::RecordSet;
use tickstats::ports::record_source::RecordSource;

/// In-memory record source.
pub struct MockRecordSource {
    pub rows: Vec<RawRecord>,
}

impl MockRecordSource {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn with_row(mut self, name: &str, date: &str, price: &str) -> Self {
        self.rows.push(raw(name, date, price));
        self
    }

    pub fn with_raw(mut self, row: RawRecord) -> Self {
        self.rows.push(row);
        self
    }
}

impl RecordSource for MockRecordSource {
    fn load(&self) -> Result<Vec<RawRecord>, tickstats::domain::error::TickstatsError> {
        Ok(self.rows.clone())
    }
}

pub fn raw(name: &str, date: &str, price: &str) -> RawRecord {
    RawRecord::new()
        .with_field(NAME_FIELD, name)
        .with_field(DATE_FIELD, date)
        .with_field(PRICE_FIELD, price)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_record(name: &str, date: &str, price: f64) -> Record {
    Record::new(
        name,
        Some(NaiveDate::parse_from_str(date, "%d-%b-%Y").unwrap()),
        price,
    )
}

/// The three-row AICIXE sample used across the tests.
pub fn aicixe_source() -> MockRecordSource {
    MockRecordSource::new()
        .with_row("AICIXE", "01-Jan-2019", "10.000")
        .with_row("AICIXE", "05-Jan-2019", "15.000")
        .with_row("AICIXE", "10-Jan-2019", "8.000")
}

pub fn aicixe_set() -> RecordSet {
    aicixe_source().load_record_set().unwrap()
}

/// Consecutive daily records starting at `start_date`, priced `start_price + i`.
pub fn generate_records(name: &str, start_date: &str, count: usize, start_price: f64) -> RecordSet {
    let start = NaiveDate::parse_from_str(start_date, "%d-%b-%Y").unwrap();
    (0..count)
        .map(|i| {
            Record::new(
                name,
                Some(start + chrono::Duration::days(i as i64)),
                start_price + i as f64,
            )
        })
        .collect()
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub const SAMPLE_CSV: &str = "StockName,StockDate,StockPrice\n\
AICIXE,10-Jan-2019,8.000\n\
BLUE,02-Jan-2019,40.000\n\
AICIXE,01-Jan-2019,10.000\n\
AICIXE,05-Jan-2019,15.000\n\
BLUE,03-Jan-2019,42.500\n\
AICIXE,,99.000\n";
