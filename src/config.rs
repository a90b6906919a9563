//! Application configuration loaded from an optional TOML file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::generation::GeneratorBackend;
use crate::infrastructure::generation::AnthropicSettings;
use crate::infrastructure::runtime::PythonMcpRuntime;

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "mcp-forge.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub generator: GeneratorSettings,

    #[serde(default)]
    pub external_model: ExternalModelSettings,

    #[serde(default)]
    pub archives: ArchiveSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub auto_port: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auto_port: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default)]
    pub backend: GeneratorBackend,

    #[serde(default = "default_runtime_package")]
    pub runtime_package: String,

    #[serde(default = "default_runtime_min_version")]
    pub runtime_min_version: String,

    #[serde(default = "default_launcher")]
    pub launcher: String,
}

fn default_runtime_package() -> String {
    PythonMcpRuntime::DEFAULT_PACKAGE.to_string()
}

fn default_runtime_min_version() -> String {
    PythonMcpRuntime::DEFAULT_MIN_VERSION.to_string()
}

fn default_launcher() -> String {
    PythonMcpRuntime::DEFAULT_LAUNCHER.to_string()
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            backend: GeneratorBackend::default(),
            runtime_package: default_runtime_package(),
            runtime_min_version: default_runtime_min_version(),
            launcher: default_launcher(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalModelSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

impl Default for ExternalModelSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_purge_interval_secs() -> u64 {
    60
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `mcp-forge.toml` in the
    /// working directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    info!("Configuration file not found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn runtime(&self) -> PythonMcpRuntime {
        PythonMcpRuntime::new(
            &self.generator.runtime_package,
            &self.generator.runtime_min_version,
            &self.generator.launcher,
        )
    }

    /// Read the external model API key from the configured variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.external_model.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn anthropic_settings(&self) -> AnthropicSettings {
        AnthropicSettings {
            base_url: self.external_model.base_url.clone(),
            model: self.external_model.model.clone(),
            max_tokens: self.external_model.max_tokens,
            timeout: Duration::from_secs(self.external_model.timeout_secs),
            api_key: self.api_key(),
        }
    }

    pub fn archive_ttl(&self) -> Duration {
        Duration::from_secs(self.archives.ttl_secs)
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.archives.purge_interval_secs.max(1))
    }
}
