//! tickstats — price statistics over historical stock records.
//!
//! Hexagonal architecture: the record query core in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], and the interactive
//! flow in [`session`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod session;
pub mod cli;
