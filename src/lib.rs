//! `agnp-sim` library crate.
//!
//! The binary (`agnp`) is a thin wrapper around this library so that:
//!
//! - the sweep/model/dataset engine is testable without spawning processes
//! - the CLI and the TUI share one pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod sweep;
pub mod tui;
