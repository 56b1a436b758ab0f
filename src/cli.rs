//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::terminal_prompt::TerminalPrompt;
use crate::domain::date_format::{format_date, parse_date};
use crate::domain::error::TickstatsError;
use crate::domain::record_set::RecordSet;
use crate::domain::session_config::{SessionConfig, build_session_config};
use crate::domain::summary::{QueryOutcome, run_query};
use crate::ports::record_source::RecordSource;
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "tickstats", about = "Price statistics for historical stock records")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// CSV file with StockName, StockDate and StockPrice columns
    pub file: Option<PathBuf>,
    /// INI file with session defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize one ticker over a date window
    Query {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        ticker: Option<String>,
        /// First day of the window (DD-Mon-YYYY)
        #[arg(long)]
        start: Option<String>,
        /// Last day of the window (DD-Mon-YYYY)
        #[arg(long)]
        end: Option<String>,
    },
    /// Prompt for ticker and dates, then summarize
    Interactive {
        #[command(flatten)]
        input: InputArgs,
    },
    /// List one ticker's records in order
    Show {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        ticker: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Sort by price instead of date
        #[arg(long)]
        by_price: bool,
    },
    /// List the tickers present in the input
    Tickers {
        #[command(flatten)]
        input: InputArgs,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Query {
            input,
            ticker,
            start,
            end,
        } => run_query_command(&input, ticker.as_deref(), start.as_deref(), end.as_deref()),
        Command::Interactive { input } => run_interactive(&input),
        Command::Show {
            input,
            ticker,
            desc,
            by_price,
        } => run_show(&input, ticker.as_deref(), desc, by_price),
        Command::Tickers { input } => run_tickers(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

/// Print an error the way the terminal user expects and pick the exit code.
/// A missing input file is not treated as a failure.
pub fn report_error(err: &TickstatsError) -> ExitCode {
    match err {
        TickstatsError::InputNotFound { path } => {
            debug!(%path, "input file missing");
            println!("File not found");
        }
        _ => eprintln!("error: {err}"),
    }
    ExitCode::from(err)
}

pub fn load_config(path: Option<&PathBuf>) -> Result<SessionConfig, TickstatsError> {
    let adapter = match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            FileConfigAdapter::from_file(p)?
        }
        None => FileConfigAdapter::empty(),
    };
    build_session_config(&adapter)
}

/// The file argument wins over `[input] path`.
pub fn resolve_input_path(
    file: Option<&PathBuf>,
    config: &SessionConfig,
) -> Result<PathBuf, TickstatsError> {
    file.cloned()
        .or_else(|| config.input_path.as_ref().map(PathBuf::from))
        .ok_or_else(|| TickstatsError::ConfigInvalid {
            section: "input".into(),
            key: "path".into(),
            reason: "no input file given (pass FILE or set [input] path)".into(),
        })
}

pub fn resolve_ticker(
    ticker: Option<&str>,
    config: &SessionConfig,
) -> Result<String, TickstatsError> {
    ticker
        .map(str::to_string)
        .or_else(|| config.ticker.clone())
        .ok_or_else(|| TickstatsError::ConfigInvalid {
            section: "query".into(),
            key: "ticker".into(),
            reason: "no ticker given (use --ticker or set [query] ticker)".into(),
        })
}

/// Window bounds: flag, then config, then the selection's own date span.
/// Returns `None` when no bound can be determined.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    config: &SessionConfig,
    selected: &RecordSet,
) -> Result<Option<(NaiveDate, NaiveDate)>, TickstatsError> {
    let span = selected.date_range();
    let start = match start {
        Some(s) => Some(parse_date(s)?),
        None => config.start_date.or(span.map(|r| r.0)),
    };
    let end = match end {
        Some(s) => Some(parse_date(s)?),
        None => config.end_date.or(span.map(|r| r.1)),
    };

    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(TickstatsError::InvalidDateRange {
            start: format_date(start),
            end: format_date(end),
        }),
        (Some(start), Some(end)) => Ok(Some((start, end))),
        _ => Ok(None),
    }
}

fn load_records(input: &InputArgs) -> Result<(SessionConfig, RecordSet), TickstatsError> {
    let config = load_config(input.config.as_ref())?;
    let path = resolve_input_path(input.file.as_ref(), &config)?;
    let records = CsvAdapter::new(&path).load_record_set()?;
    info!(path = %path.display(), records = records.len(), "loaded input");
    Ok((config, records))
}

fn run_query_command(
    input: &InputArgs,
    ticker: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(), TickstatsError> {
    let (config, records) = load_records(input)?;
    let ticker = resolve_ticker(ticker, &config)?;
    let outcome = execute_query(&records, &ticker, start, end, &config)?;
    println!("{outcome}");
    Ok(())
}

/// Resolve the window for `ticker` and run the query pipeline over `records`.
pub fn execute_query(
    records: &RecordSet,
    ticker: &str,
    start: Option<&str>,
    end: Option<&str>,
    config: &SessionConfig,
) -> Result<QueryOutcome, TickstatsError> {
    let selected = records.get(ticker);
    match resolve_range(start, end, config, &selected)? {
        Some((start, end)) => run_query(records, ticker, start, end),
        None if selected.is_empty() => run_query(records, ticker, NaiveDate::MIN, NaiveDate::MAX),
        None => Ok(QueryOutcome::NoDatedRecords {
            ticker: ticker.to_string(),
        }),
    }
}

fn run_interactive(input: &InputArgs) -> Result<(), TickstatsError> {
    let (config, records) = load_records(input)?;
    let mut session = Session::new(TerminalPrompt::stdio(), io::stdout(), &records, &config);
    session.run()?;
    Ok(())
}

fn run_show(
    input: &InputArgs,
    ticker: Option<&str>,
    desc: bool,
    by_price: bool,
) -> Result<(), TickstatsError> {
    let (config, records) = load_records(input)?;
    let ticker = resolve_ticker(ticker, &config)?;
    let ordered = records.get(&ticker).order(desc, by_price);
    write_listing(&mut io::stdout().lock(), &ordered)?;
    eprintln!("{} records", ordered.len());
    Ok(())
}

pub fn write_listing<W: Write>(out: &mut W, records: &RecordSet) -> io::Result<()> {
    for record in records {
        writeln!(out, "{record}")?;
    }
    Ok(())
}

fn run_tickers(input: &InputArgs) -> Result<(), TickstatsError> {
    let (_, records) = load_records(input)?;
    write_tickers(&mut io::stdout().lock(), &records)?;
    Ok(())
}

pub fn write_tickers<W: Write>(out: &mut W, records: &RecordSet) -> io::Result<()> {
    for name in records.names() {
        let selected = records.get(&name);
        match selected.date_range() {
            Some((first, last)) => writeln!(
                out,
                "{}: {} records, {} to {}",
                name,
                selected.len(),
                format_date(first),
                format_date(last)
            )?,
            None => writeln!(out, "{}: {} records, no dates", name, selected.len())?,
        }
    }
    Ok(())
}
