//! Command-line interface for soundmark.
//!
//! This module provides CLI commands for identifying clips, replaying
//! captured engine payloads, querying the link service, and running the
//! HTTP server.

mod commands;

pub use commands::{Cli, Commands, run_command};
