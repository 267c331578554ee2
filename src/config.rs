use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

// =============================================================================
// Endpoints
// =============================================================================

/// Default location of the tracked mod list
pub const DEFAULT_MODS_URL: &str = "https://mods-guerra.netlify.app/mods.json";

/// Base URL of the Thunderstore package metadata API
pub const DEFAULT_REGISTRY_API_URL: &str = "https://thunderstore.io/api/experimental";

/// Base URL for package page links
pub const DEFAULT_REGISTRY_SITE_URL: &str = "https://thunderstore.io";

/// Base URL of the Telegram Bot API
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Channel used when a mod URL has an empty channel segment
pub const DEFAULT_CHANNEL: &str = "repo";

// =============================================================================
// Fetch tuning
// =============================================================================

/// Maximum number of registry calls in flight
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Timeout for each HTTP call in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str = concat!("modwatch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Application configuration, read from `config.json`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub mods_url: String,
    /// Prior snapshot source (URL or path); absent means an empty baseline
    pub snapshot: Option<String>,
    pub concurrency: usize,
    pub request_timeout_secs: u64,
    pub registry: RegistryConfig,
    pub notify: NotifyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mods_url: DEFAULT_MODS_URL.to_string(),
            snapshot: None,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            registry: RegistryConfig::default(),
            notify: NotifyConfig::default(),
        }
    }
}

/// Registry endpoints
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub api_url: String,
    pub site_url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_REGISTRY_API_URL.to_string(),
            site_url: DEFAULT_REGISTRY_SITE_URL.to_string(),
        }
    }
}

/// Notification settings. Credentials are never read from the config file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NotifyConfig {
    pub api_url: String,
    pub style: NotifyStyle,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            style: NotifyStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NotifyStyle {
    /// List every updated mod with its new version
    #[default]
    PerMod,
    /// Only report counts
    Summary,
}

impl AppConfig {
    /// Load a config file named by the user; any failure is an error
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config at [`config_path`], falling back to defaults when it is
    /// missing or invalid
    pub fn load_default() -> Self {
        let path = config_path();
        if !path.exists() {
            debug!("No config at {}; using defaults", path.display());
            return Self::default();
        }
        Self::load_from(&path)
            .inspect_err(|e| warn!("{}; using defaults", e))
            .unwrap_or_default()
    }
}

/// Returns the path to the config directory for modwatch.
/// Uses $XDG_CONFIG_HOME/modwatch if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/modwatch,
/// or ./modwatch if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("modwatch")
}
