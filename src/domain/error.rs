//! Domain error types.

/// Top-level error type for tickstats.
#[derive(Debug, thiserror::Error)]
pub enum TickstatsError {
    #[error("input file not found: {path}")]
    InputNotFound { path: String },

    #[error("failed to read {path}: {reason}")]
    Input { path: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("malformed date {value:?}: {reason}")]
    MalformedDate { value: String, reason: String },

    #[error("malformed price {value:?}: {reason}")]
    MalformedPrice { value: String, reason: String },

    #[error("{operation} requires a non-empty record set")]
    EmptyRecordSet { operation: &'static str },

    #[error("{operation} requires at least {need} records, have {have}")]
    InsufficientRecords {
        operation: &'static str,
        have: usize,
        need: usize,
    },

    #[error("{operation} result exceeds the representable range")]
    NumericOverflow { operation: &'static str },

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("gave up on {field} after {attempts} invalid attempts")]
    RetriesExhausted { field: String, attempts: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TickstatsError {
    /// Process exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            TickstatsError::InputNotFound { .. } => 0,
            TickstatsError::Input { .. } | TickstatsError::Io(_) => 1,
            TickstatsError::ConfigParse { .. } | TickstatsError::ConfigInvalid { .. } => 2,
            TickstatsError::MalformedDate { .. }
            | TickstatsError::MalformedPrice { .. }
            | TickstatsError::NumericOverflow { .. } => 3,
            TickstatsError::EmptyRecordSet { .. }
            | TickstatsError::InsufficientRecords { .. }
            | TickstatsError::InvalidDateRange { .. } => 4,
            TickstatsError::RetriesExhausted { .. } => 5,
        }
    }
}

impl From<&TickstatsError> for std::process::ExitCode {
    fn from(err: &TickstatsError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
