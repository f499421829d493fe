//! Service configuration loading
//!
//! Settings live in a TOML document with one section per provider:
//!
//! ```toml
//! [deepseek]
//! api_key = "sk-..."
//! base_url = "https://api.deepseek.com/v1"  # optional
//! model = "deepseek-reasoner"               # optional
//! ```
//!
//! The document is parsed once into [`Settings`] and reused for every call.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory and the config dir.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Service section '[{0}]' not found in config")]
    NotFound(String),
    #[error("Missing required key '{key}' in section '[{service}]'")]
    MissingKey { service: String, key: &'static str },
    #[error("No model given and section '[{0}]' has no default model")]
    MissingModel(String),
}

/// Resolved settings for a single service section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Access key sent as the bearer token
    pub api_key: String,
    /// Endpoint override; the provider default is used when absent
    pub base_url: Option<String>,
    /// Default model identifier
    pub model: Option<String>,
}

impl ServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            model: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

// Sections are kept loose so a missing api_key is reported by name
// instead of as a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawSection {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
}

/// Parsed settings document.
///
/// Only the requested section is deserialized, so unrelated top-level keys
/// do not affect lookups.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    sections: HashMap<String, toml::Value>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading settings");

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_str(&content)
    }

    /// Parse settings from an in-memory TOML document
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Default settings location.
    ///
    /// `./config.toml` wins when it exists, otherwise
    /// `$XDG_CONFIG_HOME/modelcall/config.toml`.
    pub fn default_path() -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }

        dirs::config_dir()
            .map(|d| d.join("modelcall").join(CONFIG_FILE_NAME))
            .unwrap_or(local)
    }

    /// Resolve the named service section
    pub fn service(&self, name: &str) -> Result<ServiceConfig, ConfigError> {
        let section: RawSection = self
            .sections
            .get(name)
            .filter(|value| value.is_table())
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))?
            .clone()
            .try_into()?;

        let api_key = section.api_key.ok_or_else(|| ConfigError::MissingKey {
            service: name.to_string(),
            key: "api_key",
        })?;

        Ok(ServiceConfig {
            api_key,
            base_url: section.base_url,
            model: section.model,
        })
    }

    /// Names of all sections in the document
    pub fn services(&self) -> impl Iterator<Item = &String> {
        self.sections
            .iter()
            .filter(|(_, value)| value.is_table())
            .map(|(name, _)| name)
    }
}
