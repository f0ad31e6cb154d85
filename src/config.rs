//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\soundmark\config.toml
//! - macOS: ~/Library/Application Support/soundmark/config.toml
//! - Linux: ~/.config/soundmark/config.toml
//!
//! A different file can be given with `--config`. The config is loaded once
//! at startup, validated, and then shared read-only (behind an `Arc`) by every
//! request.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder substituted with the catalog id in `catalog_url_template`.
pub const CATALOG_ID_PLACEHOLDER: &str = "{id}";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Primary platform resolved directly from the engine payload
    pub platform: PlatformConfig,

    /// Cross-platform link-resolution service
    pub links: LinkServiceConfig,

    /// Fingerprint engine adapter
    pub engine: EngineConfig,

    /// Pipeline feature flags
    pub pipeline: PipelineOptions,

    /// HTTP server settings
    pub server: ServerConfig,
}

/// Primary platform settings (Apple Music by default)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Human name matched against `hub.providers[].type`
    pub name: String,

    /// Domain token a bare hub action URI must contain
    pub domain: String,

    /// Canonical link built from the catalog id; must be https and contain `{id}`
    pub catalog_url_template: String,

    /// Platform key understood by the link-resolution service
    pub service_platform: String,

    /// Entity type passed to the link-resolution service
    pub service_entity_type: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            name: "apple music".to_string(),
            domain: "music.apple.com".to_string(),
            catalog_url_template: "https://music.apple.com/song/{id}".to_string(),
            service_platform: "appleMusic".to_string(),
            service_entity_type: "song".to_string(),
        }
    }
}

impl PlatformConfig {
    /// Build the canonical catalog URL for an id.
    pub fn catalog_url(&self, id: &str) -> String {
        self.catalog_url_template
            .replace(CATALOG_ID_PLACEHOLDER, &urlencoding::encode(id))
    }
}

/// song.link (Odesli) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkServiceConfig {
    /// Links endpoint
    pub base_url: String,

    /// Upper bound for one resolution call, in milliseconds
    pub timeout_ms: u64,

    /// Key in `linksByPlatform` used for the secondary link
    pub secondary_platform: String,

    /// Optional storefront country (e.g. "US")
    pub user_country: Option<String>,

    /// Optional API key (raises the anonymous rate limit)
    pub api_key: Option<String>,
}

impl Default for LinkServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.song.link/v1-alpha.1/links".to_string(),
            timeout_ms: 5_000,
            secondary_platform: "spotify".to_string(),
            user_country: None,
            api_key: None,
        }
    }
}

impl LinkServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Fingerprint engine (SongRec CLI) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Explicit executable; probed from common locations when unset
    pub command: Option<PathBuf>,

    /// Arguments placed before the audio path
    pub args: Vec<String>,

    /// Kill the engine after this many seconds
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: vec!["audio-file-to-recognized-song".to_string()],
            timeout_secs: 30,
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Optional pipeline behaviour.
///
/// The defaults give the most complete result; each flag narrows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Populate `coverArt`
    pub cover_art: bool,

    /// Call the link-resolution service for `secondaryPlatformUrl`
    pub resolve_secondary: bool,

    /// Only accept `hub.options` URIs on the platform domain
    pub strict_option_links: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            cover_art: true,
            resolve_secondary: true,
            strict_option_links: false,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,

    /// Allow any origin, method and header
    pub cors_allow_any: bool,

    /// Largest accepted upload body
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            cors_allow_any: true,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Check invariants that the rest of the crate relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let template = &self.platform.catalog_url_template;
        if !crate::recognition::links::is_secure_uri(template) {
            return Err(ConfigError::Invalid(format!(
                "platform.catalog_url_template must be an absolute https URL, got {template:?}"
            )));
        }
        if !template.contains(CATALOG_ID_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "platform.catalog_url_template must contain {CATALOG_ID_PLACEHOLDER}"
            )));
        }
        if self.platform.name.trim().is_empty() {
            return Err(ConfigError::Invalid("platform.name is empty".to_string()));
        }
        if self.platform.domain.trim().is_empty() {
            return Err(ConfigError::Invalid("platform.domain is empty".to_string()));
        }
        if self.links.timeout_ms == 0 {
            return Err(ConfigError::Invalid("links.timeout_ms must be > 0".to_string()));
        }
        if self.engine.timeout_secs == 0 {
            return Err(ConfigError::Invalid("engine.timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("soundmark"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from an explicit path or the default location.
///
/// A missing file yields defaults. A file that exists but cannot be read or
/// parsed is an error: a server should not quietly run with settings it was
/// not given.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                return finish(Config::default());
            }
        },
    };

    if !path.exists() {
        if explicit.is_some() {
            return Err(ConfigError::NotFound(path));
        }
        tracing::info!("No config file found at {:?}, using defaults", path);
        return finish(Config::default());
    }

    let contents =
        std::fs::read_to_string(&path).map_err(|e| ConfigError::Read(path.clone(), e))?;
    let config: Config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.clone(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    finish(config)
}

fn finish(config: Config) -> Result<Config, ConfigError> {
    config.validate()?;
    Ok(config)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[platform]"));
        assert!(toml.contains("[links]"));
        assert!(toml.contains("[engine]"));
        assert!(toml.contains("[pipeline]"));
        assert!(toml.contains("[server]"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[links]
secondary_platform = "deezer"
timeout_ms = 1500
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.links.secondary_platform, "deezer");
        assert_eq!(config.links.timeout(), Duration::from_millis(1500));

        assert_eq!(config.platform.domain, "music.apple.com");
        assert!(config.pipeline.cover_art);
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_catalog_url_substitutes_id() {
        let platform = PlatformConfig::default();
        assert_eq!(
            platform.catalog_url("12345"),
            "https://music.apple.com/song/12345"
        );
    }

    #[test]
    fn test_insecure_template_rejected() {
        let mut config = Config::default();
        config.platform.catalog_url_template = "http://music.apple.com/song/{id}".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut config = Config::default();
        config.platform.catalog_url_template = "https://music.apple.com/song/".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.links.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(load(Some(&path)), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[pipeline]\nresolve_secondary = false\n[server]\nbind = \"0.0.0.0:9000\"\n",
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();
        assert!(!config.pipeline.resolve_secondary);
        assert_eq!(config.server.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        assert!(matches!(load(Some(&path)), Err(ConfigError::Parse(_, _))));
    }
}
