//! song.link HTTP client
//!
//! Maps a link on one streaming platform to links on the others.
//! See: https://odesli.co
//!
//! ## API Notes
//!
//! - Anonymous use is limited to 10 requests/minute; a `key` lifts that.
//! - A lookup is either `platform` + `type` + `id` or a single `url`.
//! - Unknown entities come back as 4xx with a JSON `code`, not an empty map.

use super::{adapter, dto};
use crate::config::LinkServiceConfig;
use crate::recognition::domain::{LinkQuery, LinksByPlatform, RecognitionError};

/// song.link API client
pub struct SongLinkClient {
    http_client: reqwest::Client,
    base_url: String,
    user_country: Option<String>,
    api_key: Option<String>,
}

impl SongLinkClient {
    /// Create a client from config.
    ///
    /// The configured timeout is applied to every request, so a stalled
    /// service cannot hold a recognition response hostage.
    pub fn new(config: &LinkServiceConfig) -> Result<Self, RecognitionError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(config.timeout())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| RecognitionError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            user_country: config.user_country.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Look up links for an entity
    pub async fn resolve(&self, query: &LinkQuery) -> Result<LinksByPlatform, RecognitionError> {
        let response = self.send_links_request(query).await?;
        Ok(adapter::to_links(response))
    }

    /// Build the request URL for a query
    pub(crate) fn request_url(&self, query: &LinkQuery) -> String {
        let mut url = match query {
            LinkQuery::ById {
                platform,
                entity_type,
                id,
            } => format!(
                "{}?platform={}&type={}&id={}",
                self.base_url,
                urlencoding::encode(platform),
                urlencoding::encode(entity_type),
                urlencoding::encode(id)
            ),
            LinkQuery::ByUrl(link) => {
                format!("{}?url={}", self.base_url, urlencoding::encode(link))
            }
        };

        if let Some(country) = &self.user_country {
            url.push_str("&userCountry=");
            url.push_str(&urlencoding::encode(country));
        }
        if let Some(key) = &self.api_key {
            url.push_str("&key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    /// Send the HTTP request and parse the response
    async fn send_links_request(
        &self,
        query: &LinkQuery,
    ) -> Result<dto::LinksResponse, RecognitionError> {
        let url = self.request_url(query);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                RecognitionError::Timeout
            } else {
                RecognitionError::Network(e.to_string())
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RecognitionError::ApiError("rate limited".to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let code = serde_json::from_str::<dto::ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.code)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(RecognitionError::ApiError(format!("HTTP {status}: {code}")));
        }

        response
            .json::<dto::LinksResponse>()
            .await
            .map_err(|e| RecognitionError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(user_country: Option<&str>, api_key: Option<&str>) -> SongLinkClient {
        let config = LinkServiceConfig {
            base_url: "https://api.song.link/v1-alpha.1/links".to_string(),
            user_country: user_country.map(String::from),
            api_key: api_key.map(String::from),
            ..Default::default()
        };
        SongLinkClient::new(&config).unwrap()
    }

    #[test]
    fn test_url_by_id() {
        let url = client(None, None).request_url(&LinkQuery::ById {
            platform: "appleMusic".to_string(),
            entity_type: "song".to_string(),
            id: "12345".to_string(),
        });
        assert_eq!(
            url,
            "https://api.song.link/v1-alpha.1/links?platform=appleMusic&type=song&id=12345"
        );
    }

    #[test]
    fn test_url_by_link_is_encoded() {
        let url = client(Some("GB"), Some("k")).request_url(&LinkQuery::ByUrl(
            "https://music.apple.com/gb/album/x?i=1".to_string(),
        ));
        assert_eq!(
            url,
            "https://api.song.link/v1-alpha.1/links?url=https%3A%2F%2Fmusic.apple.com%2Fgb%2Falbum%2Fx%3Fi%3D1&userCountry=GB&key=k"
        );
    }
}
