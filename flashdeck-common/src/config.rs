//! Configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error; a malformed one is. Nothing here
//! logs: configuration is resolved before the tracing subscriber exists.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_CONFIG: &str = "FLASHDECK_CONFIG";
pub const ENV_HOST: &str = "FLASHDECK_HOST";
pub const ENV_PORT: &str = "FLASHDECK_PORT";
pub const ENV_DATABASE: &str = "FLASHDECK_DATABASE";
pub const ENV_ALLOWED_ORIGIN: &str = "FLASHDECK_ALLOWED_ORIGIN";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub allowed_origin: Option<String>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Default config file path (`<config_dir>/flashdeck/config.toml`)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flashdeck")
            .join("config.toml")
    }

    /// Load config from disk, returning defaults if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(config)
    }
}

/// Compiled defaults used when nothing else provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|d| d.join("flashdeck"))
            .unwrap_or_else(|| PathBuf::from("./flashdeck_data"));

        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: data_dir.join("flashdeck.db"),
            log_level: "info".to_string(),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub allowed_origin: Option<String>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// `None` means CORS is permissive
    pub allowed_origin: Option<String>,
    pub log_level: String,
}

impl ServerConfig {
    /// `host:port` string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolves [`ServerConfig`] from CLI, environment, TOML and defaults
pub struct ConfigResolver {
    cli: CliOverrides,
}

impl ConfigResolver {
    pub fn new(cli: CliOverrides) -> Self {
        Self { cli }
    }

    /// Path of the TOML file to read: CLI, then environment, then default
    pub fn config_path(&self) -> PathBuf {
        self.cli
            .config_path
            .clone()
            .or_else(|| env_value(ENV_CONFIG).map(PathBuf::from))
            .unwrap_or_else(TomlConfig::default_path)
    }

    pub fn resolve(&self) -> Result<ServerConfig> {
        let toml = TomlConfig::load(&self.config_path())?;
        self.resolve_with(toml)
    }

    /// Resolve against an already loaded TOML config
    pub fn resolve_with(&self, toml: TomlConfig) -> Result<ServerConfig> {
        let defaults = CompiledDefaults::for_current_platform();

        let host = self
            .cli
            .host
            .clone()
            .or_else(|| env_value(ENV_HOST))
            .or(toml.host)
            .unwrap_or(defaults.host);

        let env_port = match env_value(ENV_PORT) {
            Some(raw) => Some(raw.parse::<u16>().map_err(|_| {
                Error::Config(format!("{} is not a valid port: {}", ENV_PORT, raw))
            })?),
            None => None,
        };
        let port = self
            .cli
            .port
            .or(env_port)
            .or(toml.port)
            .unwrap_or(defaults.port);

        let database_path = self
            .cli
            .database_path
            .clone()
            .or_else(|| env_value(ENV_DATABASE).map(PathBuf::from))
            .or(toml.database_path)
            .unwrap_or(defaults.database_path);

        let allowed_origin = self
            .cli
            .allowed_origin
            .clone()
            .or_else(|| env_value(ENV_ALLOWED_ORIGIN))
            .or(toml.allowed_origin)
            .filter(|o| !o.trim().is_empty());

        let log_level = toml.log_level.unwrap_or(defaults.log_level);

        Ok(ServerConfig {
            host,
            port,
            database_path,
            allowed_origin,
            log_level,
        })
    }
}

/// Non-empty environment variable value
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
