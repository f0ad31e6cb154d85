//! Soundmark - identify a song from a short audio clip.
//!
//! A fingerprint engine turns the clip into a raw match payload; soundmark
//! reduces that payload to a flat result with title, artist, cover art and
//! links on two streaming platforms. It runs as a CLI or as an HTTP server.

pub mod cli;
pub mod config;
pub mod error;
pub mod recognition;
pub mod server;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("soundmark=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
