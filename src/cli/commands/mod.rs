//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `recognize`: clip identification, payload replay and tool checks
//! - `links`: direct link-service lookups
//! - `serve`: the HTTP server

mod links;
mod recognize;
mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::error::Result;
use crate::recognition::RecognitionResult;
use crate::recognition::domain::NO_MATCH_MESSAGE;

pub use links::cmd_links;
pub use recognize::{cmd_assemble, cmd_check_tools, cmd_identify};
pub use serve::cmd_serve;

/// Soundmark CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file (default: <config dir>/soundmark/config.toml)
    #[arg(long, global = true, env = "SOUNDMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// song.link API key (overrides the config file)
    #[arg(long, global = true, env = "SONGLINK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Identify a song from an audio clip
    Identify {
        /// Path to the audio file
        path: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assemble a result from a captured engine payload
    Assemble {
        /// Path to the payload JSON file
        payload: PathBuf,
        /// Skip the link service lookup
        #[arg(long)]
        offline: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up cross-platform links for a track
    Links {
        /// Primary platform catalog id
        #[arg(long, conflicts_with = "url", required_unless_present = "url")]
        id: Option<String>,
        /// Any platform URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Run the HTTP recognition server
    Serve {
        /// Address to bind (overrides the config file)
        #[arg(long, env = "SOUNDMARK_BIND")]
        bind: Option<String>,
    },
    /// Check if the fingerprint engine is installed
    CheckTools,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Identify { path, json } => cmd_identify(&rt, cli, path, *json),
        Commands::Assemble {
            payload,
            offline,
            json,
        } => cmd_assemble(&rt, cli, payload, *offline, *json),
        Commands::Links { id, url } => cmd_links(&rt, cli, id.as_deref(), url.as_deref()),
        Commands::Serve { bind } => cmd_serve(&rt, cli, bind.as_deref()),
        Commands::CheckTools => cmd_check_tools(cli),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Load the config file and apply command-line overrides.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = config::load(cli.config.as_deref())?;
    if let Some(key) = &cli.api_key {
        config.links.api_key = Some(key.clone());
    }
    Ok(config)
}

/// Print installation instructions for songrec
pub(crate) fn print_songrec_install_instructions() {
    eprintln!("Error: songrec not found.");
    eprintln!("Install SongRec:");
    eprintln!("  Linux:   apt install songrec  (or: flatpak install com.github.marinm.songrec)");
    eprintln!("  Other:   cargo install songrec");
    eprintln!("Or point [engine] command at the binary in the config file.");
}

/// Print a recognition result as JSON or as a short summary.
pub(crate) fn print_result(result: &RecognitionResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if !result.is_match() {
        println!("✗ {}", result.error.as_deref().unwrap_or(NO_MATCH_MESSAGE));
        return Ok(());
    }

    println!("✓ Match found!");
    println!();
    let rows = [
        ("Title", &result.title),
        ("Artist", &result.artist),
        ("Cover", &result.cover_art),
        ("Primary", &result.primary_platform_url),
        ("Id", &result.primary_platform_id),
        ("Secondary", &result.secondary_platform_url),
        ("Source", &result.source_url),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            println!("  {:<10} {}", format!("{label}:"), value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_links_requires_id_or_url() {
        assert!(Cli::try_parse_from(["soundmark", "links"]).is_err());
        assert!(Cli::try_parse_from(["soundmark", "links", "--id", "1", "--url", "https://x"]).is_err());

        let cli = Cli::try_parse_from(["soundmark", "links", "--id", "12345"]).unwrap();
        assert!(matches!(cli.command, Commands::Links { id: Some(_), url: None }));
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "soundmark",
            "assemble",
            "capture.json",
            "--offline",
            "--config",
            "/tmp/soundmark.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/soundmark.toml")));
        assert!(matches!(cli.command, Commands::Assemble { offline: true, json: false, .. }));
    }

    #[test]
    fn test_load_config_applies_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[links]\napi_key = \"from-file\"\n").unwrap();

        let cli = Cli {
            config: Some(path),
            api_key: Some("from-flag".to_string()),
            command: Commands::CheckTools,
        };
        let config = load_config(&cli).unwrap();
        assert_eq!(config.links.api_key.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_load_config_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[platform]\ncatalog_url_template = \"http://insecure/{id}\"\n").unwrap();

        let cli = Cli {
            config: Some(path),
            api_key: None,
            command: Commands::CheckTools,
        };
        let err = load_config(&cli).unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }
}
