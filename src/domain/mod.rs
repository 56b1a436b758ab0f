//! Core domain types and logic.

pub mod date_format;
pub mod error;
pub mod record;
pub mod record_set;
pub mod session_config;
pub mod summary;
