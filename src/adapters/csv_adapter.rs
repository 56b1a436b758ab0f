//! CSV file record source.
//!
//! The first row names the columns. Rows may be shorter than the header;
//! trailing columns are then absent from that row's raw record.

use crate::domain::error::TickstatsError;
use crate::domain::record::RawRecord;
use crate::ports::record_source::RecordSource;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse CSV text that has already been read into memory.
    pub fn parse(content: &str, origin: &str) -> Result<Vec<RawRecord>, TickstatsError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| TickstatsError::Input {
                path: origin.to_string(),
                reason: format!("CSV header error: {e}"),
            })?
            .clone();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| TickstatsError::Input {
                path: origin.to_string(),
                reason: format!("CSV parse error: {e}"),
            })?;
            let raw: RawRecord = headers
                .iter()
                .zip(record.iter())
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            rows.push(raw);
        }

        debug!(rows = rows.len(), columns = headers.len(), origin, "parsed CSV input");
        Ok(rows)
    }
}

impl RecordSource for CsvAdapter {
    fn load(&self) -> Result<Vec<RawRecord>, TickstatsError> {
        let origin = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TickstatsError::InputNotFound {
                path: origin.clone(),
            },
            _ => TickstatsError::Input {
                path: origin.clone(),
                reason: e.to_string(),
            },
        })?;
        Self::parse(&content, &origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{DATE_FIELD, NAME_FIELD, PRICE_FIELD};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup_test_data(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn load_returns_rows_in_input_order() {
        let (_dir, path) = setup_test_data(
            "StockName,StockDate,StockPrice\n\
             AICIXE,05-Jan-2019,15.000\n\
             AICIXE,01-Jan-2019,10.000\n",
        );
        let rows = CsvAdapter::new(&path).load().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field(NAME_FIELD), Some("AICIXE"));
        assert_eq!(rows[0].field(DATE_FIELD), Some("05-Jan-2019"));
        assert_eq!(rows[1].field(PRICE_FIELD), Some("10.000"));
    }

    #[test]
    fn short_rows_leave_trailing_fields_absent() {
        let (_dir, path) = setup_test_data("StockName,StockDate,StockPrice\nAICIXE,01-Jan-2019\n");
        let rows = CsvAdapter::new(&path).load().unwrap();
        assert_eq!(rows[0].field(PRICE_FIELD), None);
    }

    #[test]
    fn missing_columns_are_absent() {
        let (_dir, path) = setup_test_data("StockName,StockPrice\nAICIXE,3.5\n");
        let set = CsvAdapter::new(&path).load_record_set().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].date(), None);
        assert_eq!(set.records()[0].price(), 3.5);
    }

    #[test]
    fn load_record_set_parses_records() {
        let (_dir, path) = setup_test_data(
            "StockName,StockDate,StockPrice\n AICIXE , 01-Jan-2019 , 10.000 \n",
        );
        let set = CsvAdapter::new(&path).load_record_set().unwrap();
        let rec = &set.records()[0];
        assert_eq!(rec.name(), "AICIXE");
        assert_eq!(rec.date(), NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(rec.price(), 10.0);
    }

    #[test]
    fn malformed_row_fails_the_load() {
        let (_dir, path) = setup_test_data(
            "StockName,StockDate,StockPrice\nA,01-Jan-2019,1.0\nA,not-a-date,2.0\n",
        );
        let err = CsvAdapter::new(&path).load_record_set().unwrap_err();
        assert!(matches!(err, TickstatsError::MalformedDate { .. }));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = TempDir::new().unwrap();
        let err = CsvAdapter::new(dir.path().join("nope.csv")).load().unwrap_err();
        assert!(matches!(err, TickstatsError::InputNotFound { .. }));
    }

    #[test]
    fn header_only_file_is_empty() {
        let rows = CsvAdapter::parse("StockName,StockDate,StockPrice\n", "inline").unwrap();
        assert!(rows.is_empty());
    }
}
