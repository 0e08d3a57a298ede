//! Configuration for MELVA.
//!
//! Maps to `melva.toml`. Every field has a default, so an empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::GeneratorKind;
use crate::error::{Result, TutorError};
use crate::types::Context;

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Learner context used when the caller supplies none.
    #[serde(default)]
    pub context: ContextConfig,
    /// HTTP API settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Response generation settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl TutorConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `TutorError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| TutorError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from `path` if it exists, defaults otherwise.
    ///
    /// The returned [`ConfigSource`] says which happened, so a caller that
    /// installs its subscriber after loading can still report the fallback.
    ///
    /// # Errors
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigSource)> {
        if path.exists() {
            Ok((Self::from_file(path)?, ConfigSource::File))
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    /// Default learner context built from `[context]`.
    pub fn default_context(&self) -> Context {
        Context {
            genre: self.context.genre.clone(),
            level: self.context.level.clone(),
            ..Context::default()
        }
        .normalized()
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the file on disk.
    File,
    /// The file was missing; every field is defaulted.
    Defaults,
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is unset: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Default learner context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default = "default_genre")]
    pub genre: String,
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            genre: default_genre(),
            level: default_level(),
        }
    }
}

/// HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Buffered live updates per session before slow WebSocket clients lag.
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

/// Response generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Strategy for new sessions.
    #[serde(default)]
    pub generator: GeneratorKind,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_genre() -> String {
    crate::DEFAULT_GENRE.to_string()
}

fn default_level() -> String {
    crate::DEFAULT_LEVEL.to_string()
}

fn default_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_broadcast_capacity() -> usize {
    100
}
