//! HTTP server command.

use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::recognition::{RecognitionService, engine};
use crate::server;

use super::{Cli, load_config, print_songrec_install_instructions};

/// Run the recognition server until Ctrl-C
pub fn cmd_serve(rt: &Runtime, cli: &Cli, bind: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(cli)?;
    if let Some(bind) = bind {
        config.server.bind = bind.to_string();
    }

    if !engine::is_engine_available(&config.engine) {
        print_songrec_install_instructions();
        std::process::exit(1);
    }

    let server_config = config.server.clone();
    let service = RecognitionService::new(Arc::new(config))?;
    rt.block_on(server::serve(service, &server_config))?;
    Ok(())
}
