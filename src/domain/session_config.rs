//! Session configuration: defaults read from the INI file and validated before use.

use crate::domain::date_format::parse_date;
use crate::domain::error::TickstatsError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DEFAULT_MAX_RETRIES: usize = 3;
pub const MAX_RETRIES_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub input_path: Option<String>,
    pub ticker: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_retries: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            ticker: None,
            start_date: None,
            end_date: None,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Validate the config and build a [`SessionConfig`] from it.
pub fn build_session_config(config: &dyn ConfigPort) -> Result<SessionConfig, TickstatsError> {
    validate_session_config(config)?;
    Ok(SessionConfig {
        input_path: non_blank(config.get_string("input", "path")),
        ticker: non_blank(config.get_string("query", "ticker")),
        start_date: config_date(config, "start_date")?,
        end_date: config_date(config, "end_date")?,
        max_retries: config.get_int("session", "max_retries", DEFAULT_MAX_RETRIES as i64) as usize,
    })
}

pub fn validate_session_config(config: &dyn ConfigPort) -> Result<(), TickstatsError> {
    validate_ticker(config)?;
    validate_dates(config)?;
    validate_max_retries(config)?;
    Ok(())
}

fn validate_ticker(config: &dyn ConfigPort) -> Result<(), TickstatsError> {
    match config.get_string("query", "ticker") {
        Some(t) if t.trim().is_empty() => Err(TickstatsError::ConfigInvalid {
            section: "query".to_string(),
            key: "ticker".to_string(),
            reason: "ticker must not be blank".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), TickstatsError> {
    let start = config_date(config, "start_date")?;
    let end = config_date(config, "end_date")?;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(TickstatsError::ConfigInvalid {
                section: "query".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must not be after end_date".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_max_retries(config: &dyn ConfigPort) -> Result<(), TickstatsError> {
    let value = match non_blank(config.get_string("session", "max_retries")) {
        None => DEFAULT_MAX_RETRIES as i64,
        Some(text) => text.parse::<i64>().map_err(|_| TickstatsError::ConfigInvalid {
            section: "session".to_string(),
            key: "max_retries".to_string(),
            reason: format!("max_retries must be an integer, got '{text}'"),
        })?,
    };
    if value < 1 || value > MAX_RETRIES_LIMIT as i64 {
        return Err(TickstatsError::ConfigInvalid {
            section: "session".to_string(),
            key: "max_retries".to_string(),
            reason: format!("max_retries must be between 1 and {MAX_RETRIES_LIMIT}"),
        });
    }
    Ok(())
}

fn config_date(config: &dyn ConfigPort, key: &str) -> Result<Option<NaiveDate>, TickstatsError> {
    match non_blank(config.get_string("query", key)) {
        None => Ok(None),
        Some(s) => parse_date(&s)
            .map(Some)
            .map_err(|_| TickstatsError::ConfigInvalid {
                section: "query".to_string(),
                key: key.to_string(),
                reason: format!("invalid {key} format, expected DD-Mon-YYYY"),
            }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
