//! Configuration - defaults, TOML file, environment
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. TOML file (`--config`, else `~/.blogctl/config.toml` when present)
//! 3. Environment: `DATABASE_URL`, `BLOGCTL_BIND`
//!
//! Command-line flags are applied on top by the binary.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;
use crate::http::ServerConfig;
use crate::pages::PageSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub pages: PagesSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind: SocketAddr,
    /// Allow any CORS origin (default: localhost only)
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesSection {
    pub site_title: String,
    /// Freshness hint for post pages, in seconds
    pub revalidate_secs: u64,
}

impl Default for PagesSection {
    fn default() -> Self {
        let settings = PageSettings::default();
        Self {
            site_title: settings.site_title,
            revalidate_secs: settings.revalidate_secs,
        }
    }
}

impl BlogConfig {
    /// Default config file location: `~/.blogctl/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".blogctl").join("config.toml"))
    }

    /// Load config from an explicit file, the default file, or defaults,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Apply `DATABASE_URL` and `BLOGCTL_BIND` from the given lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = Some(url);
        }

        if let Some(bind) = lookup("BLOGCTL_BIND") {
            self.server.bind = bind.parse().map_err(|_| ConfigError::InvalidValue {
                key: "BLOGCTL_BIND",
                value: bind,
            })?;
        }

        Ok(())
    }

    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            site_title: self.pages.site_title.clone(),
            revalidate_secs: self.pages.revalidate_secs,
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.server.bind,
            cors_permissive: self.server.cors_permissive,
            pages: self.page_settings(),
        }
    }
}
