//! Subcommand implementations.

pub mod config;
pub mod parse;
pub mod refresh;
pub mod server;
pub mod url;
