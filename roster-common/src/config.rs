//! Configuration loading and resolution
//!
//! Sources in priority order:
//! 1. Command-line arguments (applied by the binary on top of the loaded file)
//! 2. Environment variables
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing config file is not an error: the service warns and starts on
//! defaults. A config file that exists but does not parse is an error.

use crate::classifier::VisibilityPolicy;
use crate::photo::{DEFAULT_FLOOR_YEAR, DEFAULT_PHOTO_YEAR};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ROSTER_CONFIG";

/// Content API project used by the roster site
pub const DEFAULT_PROJECT_ID: &str = "6t93n5tw";

/// Roster service configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RosterConfig {
    /// Content API project id
    pub project_id: String,

    /// Content API dataset
    pub dataset: String,

    /// Query API version segment (`v<api_version>` in the URL)
    pub api_version: String,

    /// Query through the API CDN rather than the live API
    pub use_cdn: bool,

    /// HTTP server port
    ///
    /// Default: 5790
    pub port: u16,

    /// HTTP server bind address
    pub bind_address: String,

    /// Content API request timeout in seconds
    pub request_timeout_secs: u64,

    /// Photo fallback search gives up at or below this year
    pub floor_year: i32,

    /// Year whose group photo is shown when the search gives up
    pub default_year: i32,

    /// Image shown on member cards without a photo
    pub placeholder_image: String,

    /// Members section title rule
    pub visibility_policy: VisibilityPolicy,

    /// Logging configuration (optional)
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            dataset: "production".to_string(),
            api_version: "2021-10-21".to_string(),
            use_cdn: true,
            port: 5790,
            bind_address: "127.0.0.1".to_string(),
            request_timeout_secs: 15,
            floor_year: DEFAULT_FLOOR_YEAR,
            default_year: DEFAULT_PHOTO_YEAR,
            placeholder_image: "img/hat.png".to_string(),
            visibility_policy: VisibilityPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl RosterConfig {
    /// Parse a TOML document; unset keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RosterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file that must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve and load the config file
    ///
    /// `cli_path` wins over `ROSTER_CONFIG`, which wins over the platform
    /// config directory. Only the platform default may be missing.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_path {
            info!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            info!("Loading config from {} ({})", path.display(), CONFIG_ENV_VAR);
            return Self::from_file(&path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            Some(path) => {
                warn!("Config file not found at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                warn!("Could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(Error::Config("project_id must not be empty".to_string()));
        }
        if self.dataset.trim().is_empty() {
            return Err(Error::Config("dataset must not be empty".to_string()));
        }
        if self.default_year <= self.floor_year {
            return Err(Error::Config(format!(
                "default_year ({}) must be above floor_year ({})",
                self.default_year, self.floor_year
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Content API base URL, e.g. `https://<project>.apicdn.sanity.io`
    pub fn api_base_url(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!("https://{}.{}.sanity.io", self.project_id, host)
    }

    /// Query endpoint without the `query` parameter
    pub fn query_endpoint(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.api_base_url(),
            self.api_version,
            self.dataset
        )
    }

    /// Socket address string for the HTTP listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// `<config_dir>/roster/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("roster").join("config.toml"))
}
