use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Base URL every request path is appended to.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Directory holding persisted client state (`ui-storage`, `auth-storage`).
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    #[serde(default)]
    pub http: HttpConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_storage_dir() -> String {
    "~/.datawise/storage".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("~/.datawise/config.toml"),
            api_url: default_api_url(),
            storage_dir: default_storage_dir(),
            http: HttpConfig::default(),
        }
    }
}

// ── HTTP transport ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// TCP connect timeout (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout. Unset means a stalled request waits forever.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("datawise/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Base URL without a trailing slash, ready for `base + path`.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// `storage_dir` with `~` expanded.
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.storage_dir).into_owned())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(self.base_url()).map_err(|e| {
            ConfigError::Validation(format!("api_url {:?} is not a valid URL: {e}", self.api_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "api_url must use http or https, got {}",
                parsed.scheme()
            )));
        }
        if self.storage_dir.trim().is_empty() {
            return Err(ConfigError::Validation("storage_dir must not be empty".into()));
        }
        Ok(())
    }
}
