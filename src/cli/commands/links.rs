//! Direct link-service lookups.

use tokio::runtime::Runtime;

use crate::recognition::{LinkQuery, SongLinkClient};

use super::{Cli, load_config};

/// Query the link service by catalog id or URL and print every platform
pub fn cmd_links(
    rt: &Runtime,
    cli: &Cli,
    id: Option<&str>,
    url: Option<&str>,
) -> anyhow::Result<()> {
    let config = load_config(cli)?;

    let query = match (id, url) {
        (Some(id), _) => LinkQuery::ById {
            platform: config.platform.service_platform.clone(),
            entity_type: config.platform.service_entity_type.clone(),
            id: id.to_string(),
        },
        (None, Some(url)) => LinkQuery::ByUrl(url.to_string()),
        (None, None) => anyhow::bail!("either --id or --url is required"),
    };

    let client = SongLinkClient::new(&config.links)?;
    let links = rt.block_on(client.resolve(&query))?;

    if let Some(page) = &links.page_url {
        println!("Page: {}", page);
        println!();
    }
    if links.links.is_empty() {
        println!("No platform links returned.");
        return Ok(());
    }
    for (platform, link) in &links.links {
        let marker = if *platform == config.links.secondary_platform {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<16} {}",
            marker,
            platform,
            link.url.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
