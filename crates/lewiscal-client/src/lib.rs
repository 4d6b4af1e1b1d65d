//! Command-line interface for LewisCal.
//!
//! This crate provides the `lewiscal` binary: parse calendar files, run the
//! refresh pipeline, manage the saved calendar link and start the backend.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
