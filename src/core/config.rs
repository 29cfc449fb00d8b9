use super::rates::{BASE_CURRENCY, CurrencyRate, RateTable, default_rates};
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of static files served for any path outside the API.
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_base_currency() -> String {
    BASE_CURRENCY.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Overrides the built-in rate table when present.
    pub rates: Option<Vec<CurrencyRate>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig::default(),
            base_currency: default_base_currency(),
            rates: None,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxrates", "fxrates")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Loads from `path` when given, otherwise from the default location, then
    /// applies the `PORT` environment variable.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load()?,
        };
        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;
        Ok(config)
    }

    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<()> {
        if let Some(value) = value {
            self.server.port = parse_port(value)
                .with_context(|| format!("Invalid {PORT_ENV} configuration"))?;
            debug!(port = self.server.port, "Port taken from environment");
        }
        Ok(())
    }

    pub fn rate_table(&self) -> Result<RateTable> {
        let entries = self.rates.clone().unwrap_or_else(default_rates);
        RateTable::new(&self.base_currency, entries).context("Invalid rate table configuration")
    }
}

/// Parses a port given as a string of decimal digits.
pub fn parse_port(value: &str) -> Result<u16> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        bail!("{PORT_ENV} must be a valid number, got {value:?}");
    }
    let port: u16 = value
        .parse()
        .with_context(|| format!("{PORT_ENV} is out of range: {value}"))?;
    if port == 0 {
        bail!("{PORT_ENV} must be a positive number");
    }
    Ok(port)
}
