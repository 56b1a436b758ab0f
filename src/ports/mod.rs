//! Port traits at the boundary between the query core and its I/O.

pub mod config_port;
pub mod prompt_port;
pub mod record_source;
