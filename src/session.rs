//! Interactive query session.
//!
//! Prompts for a ticker and a date window, then prints the same summary the
//! `query` command does. Each prompt tolerates a bounded number of invalid
//! answers before the session gives up.

use crate::domain::date_format::{format_date, parse_date};
use crate::domain::error::TickstatsError;
use crate::domain::record_set::RecordSet;
use crate::domain::session_config::SessionConfig;
use crate::domain::summary::{QueryOutcome, run_query};
use crate::ports::prompt_port::PromptPort;
use chrono::NaiveDate;
use std::io::{self, Write};
use tracing::{debug, warn};

pub struct Session<'a, P, W> {
    prompt: P,
    out: W,
    records: &'a RecordSet,
    config: &'a SessionConfig,
}

impl<'a, P: PromptPort, W: Write> Session<'a, P, W> {
    pub fn new(prompt: P, out: W, records: &'a RecordSet, config: &'a SessionConfig) -> Self {
        Self {
            prompt,
            out,
            records,
            config,
        }
    }

    pub fn run(&mut self) -> Result<QueryOutcome, TickstatsError> {
        let ticker = self.ask(
            "ticker",
            "Ticker",
            self.config.ticker.clone(),
            |s| Ok(s.to_string()),
        )?;

        let selected = self.records.get(&ticker);
        let range = selected.date_range();
        let default_start = self.config.start_date.or(range.map(|r| r.0)).map(Bound);
        let default_end = self.config.end_date.or(range.map(|r| r.1)).map(Bound);

        let outcome = if selected.is_empty() {
            run_query(self.records, &ticker, NaiveDate::MIN, NaiveDate::MAX)?
        } else {
            let Bound(start) = self.ask("start date", "Start date", default_start, parse_bound)?;
            let Bound(end) = self.ask("end date", "End date", default_end, |s| {
                let end = parse_bound(s)?;
                if end.0 < start {
                    return Err(format!(
                        "end date must not be before {}",
                        format_date(start)
                    ));
                }
                Ok(end)
            })?;
            debug!(%ticker, %start, %end, "running interactive query");
            run_query(self.records, &ticker, start, end)?
        };

        writeln!(self.out, "{outcome}")?;
        Ok(outcome)
    }

    /// Prompt until `parse` accepts the answer or the retry budget runs out.
    /// An empty answer takes `default` when there is one.
    fn ask<T, F>(
        &mut self,
        field: &str,
        label: &str,
        default: Option<T>,
        parse: F,
    ) -> Result<T, TickstatsError>
    where
        T: Clone + std::fmt::Display,
        F: Fn(&str) -> Result<T, String>,
    {
        let message = match &default {
            Some(d) => format!("{label} [{d}]: "),
            None => format!("{label}: "),
        };
        let attempts = self.config.max_retries;

        for attempt in 1..=attempts {
            let answer = self.prompt.read_line(&message)?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, format!("no {field} given"))
            })?;
            let answer = answer.trim();

            let result = match (&default, answer.is_empty()) {
                (Some(d), true) => Ok(d.clone()),
                (None, true) => Err(format!("{field} is required")),
                (_, false) => parse(answer),
            };
            match result {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    warn!(field, attempt, %reason, "rejected input");
                    let left = attempts - attempt;
                    writeln!(self.out, "Invalid {field}: {reason} ({left} attempts left)")?;
                }
            }
        }

        Err(TickstatsError::RetriesExhausted {
            field: field.to_string(),
            attempts,
        })
    }
}

/// Dates shown as defaults must round-trip through the prompt, so they are
/// displayed in the input format.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bound(NaiveDate);

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_date(self.0))
    }
}

fn parse_bound(s: &str) -> Result<Bound, String> {
    parse_date(s).map(Bound).map_err(|_| format!("{s:?} is not a DD-Mon-YYYY date"))
}
