//! Server configuration.

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Where the interaction log is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Externally visible base URL used in frame meta tags. When unset it is
    /// derived from the request headers.
    #[serde(default)]
    pub public_url: Option<String>,
    /// Deployment environment reported by `/health`.
    #[serde(default = "default_env")]
    pub env: String,
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Remote image served for the initial step instead of the inline SVG.
    #[serde(default)]
    pub token_image_url: Option<String>,
    #[serde(default = "default_image_fetch_timeout_ms")]
    pub image_fetch_timeout_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_env() -> String {
    "development".to_string()
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bisou")
        .join("frames.db")
}

fn default_image_fetch_timeout_ms() -> u64 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
            env: default_env(),
            storage: StorageBackend::default(),
            db_path: default_db_path(),
            token_image_url: None,
            image_fetch_timeout_ms: default_image_fetch_timeout_ms(),
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default location (config/default.toml) or fall back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from("config/default.toml");
        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        Ok(Config::default())
    }

    /// Configured public URL without a trailing slash.
    pub fn public_base_url(&self) -> Option<&str> {
        self.public_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}
