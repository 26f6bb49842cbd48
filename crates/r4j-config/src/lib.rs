//! Configuration for the r4j reflection layer.
//!
//! Configuration is plain TOML:
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [projection]
//! max_meta_depth = 8
//!
//! [invocation]
//! log_faults = false
//! ```
//!
//! Every key is optional; missing sections take their defaults.
#![forbid(unsafe_code)]

mod logging;
mod schema;

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::logging::{init_tracing, LoggingConfig};
pub use crate::schema::json_schema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct ReflectConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub projection: ProjectionConfig,

    #[serde(default)]
    pub invocation: InvocationConfig,
}

impl ReflectConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Maximum nesting of meta-annotation views.
    ///
    /// Cycles are already cut by tracking the annotation types on the current
    /// path; this is an absolute bound on top of that. `0` projects no
    /// meta-annotations at all.
    #[serde(default = "ProjectionConfig::default_max_meta_depth")]
    pub max_meta_depth: usize,
}

impl ProjectionConfig {
    fn default_max_meta_depth() -> usize {
        16
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_meta_depth: Self::default_max_meta_depth(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct InvocationConfig {
    /// Emit a `tracing` event for every contained invocation fault.
    #[serde(default = "InvocationConfig::default_log_faults")]
    pub log_faults: bool,
}

impl InvocationConfig {
    fn default_log_faults() -> bool {
        true
    }
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            log_faults: Self::default_log_faults(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` quotes the offending source line; keep only the message.
        ConfigError::Toml(err.message().to_string())
    }
}
