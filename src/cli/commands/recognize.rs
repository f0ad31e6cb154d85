//! Clip identification and payload replay commands.

use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::config;
use crate::error::{Error, ResultExt};
use crate::recognition::engine;
use crate::recognition::pipeline::Pipeline;
use crate::recognition::{RawMatchPayload, RecognitionService, SongLinkClient};

use super::{Cli, load_config, print_result, print_songrec_install_instructions};

/// Identify a song from an audio file
pub fn cmd_identify(rt: &Runtime, cli: &Cli, path: &Path, json: bool) -> anyhow::Result<()> {
    let config = Arc::new(load_config(cli)?);

    if !engine::is_engine_available(&config.engine) {
        print_songrec_install_instructions();
        std::process::exit(1);
    }

    if !json {
        println!("Identifying: {:?}", path);
        println!();
    }

    let service = RecognitionService::new(config)?;
    let result = rt
        .block_on(service.recognize_file(path))
        .with_context(format!("recognizing {}", path.display()))?;
    print_result(&result, json)
}

/// Run the pipeline over a captured engine payload
pub fn cmd_assemble(
    rt: &Runtime,
    cli: &Cli,
    payload_path: &Path,
    offline: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = load_config(cli)?;
    if offline {
        config.pipeline.resolve_secondary = false;
    }

    let payload = read_payload(payload_path)?;
    let links = SongLinkClient::new(&config.links)?;
    let pipeline = Pipeline::new(Arc::new(config), Arc::new(links));

    let result = rt.block_on(pipeline.assemble(&payload));
    print_result(&result, json)
}

/// Report engine availability and config location
pub fn cmd_check_tools(cli: &Cli) -> anyhow::Result<()> {
    println!("Checking recognition tools...\n");

    let config = load_config(cli)?;
    if let Some(version) = engine::engine_version(&config.engine) {
        println!("✓ songrec: {}", version);
    } else {
        println!("✗ songrec: NOT FOUND");
        print_songrec_install_instructions();
    }

    println!();
    println!("Configuration:");
    match cli.config.clone().or_else(config::config_path) {
        Some(path) if path.exists() => println!("✓ config: {}", path.display()),
        Some(path) => println!("- config: {} (not found, using defaults)", path.display()),
        None => println!("- config: no config directory, using defaults"),
    }
    if config.links.api_key.is_some() {
        println!("✓ song.link API key: set");
    } else {
        println!("- song.link API key: not set (anonymous rate limits apply)");
    }

    Ok(())
}

fn read_payload(path: &Path) -> Result<RawMatchPayload, Error> {
    let text = std::fs::read_to_string(path)?;
    RawMatchPayload::from_json_str(&text).map_err(|e| Error::payload(path, e.to_string()))
}
