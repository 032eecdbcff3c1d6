//! Pipeline configuration: TOML file loading, env overrides, and the
//! handler-configuration merge used at install time.

use crate::context::AppKind;
use crate::defaults::DEFAULT_APP_KIND;
use crate::pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineSection,
    /// Handler-name overrides, merged into the host application's handler
    /// configuration when the pipeline is installed.
    pub handlers: Map<String, Value>,
}

/// Pipeline behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSection {
    pub app_kind: String,
    pub verbosity: u8,
    pub quiet: bool,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            app_kind: DEFAULT_APP_KIND.to_string(),
            verbosity: 0,
            quiet: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VOXFLOW_APP_KIND → pipeline.app_kind
    /// - VOXFLOW_VERBOSITY → pipeline.verbosity
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(kind) = std::env::var("VOXFLOW_APP_KIND")
            && !kind.is_empty()
        {
            self.pipeline.app_kind = kind;
        }

        if let Ok(verbosity) = std::env::var("VOXFLOW_VERBOSITY")
            && let Ok(level) = verbosity.parse::<u8>()
        {
            self.pipeline.verbosity = level;
        }

        self
    }

    /// Builds the runtime pipeline configuration from this file config.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            app_kind: AppKind::new(self.pipeline.app_kind.clone()),
            verbosity: self.pipeline.verbosity,
            quiet: self.pipeline.quiet,
            handler_overrides: self.handlers.clone(),
            event_tx: None,
        }
    }
}

/// Deep-merges handler overrides into a base handler configuration.
///
/// Nested objects merge recursively; any other collision is won by the
/// override value. Keys absent from `overrides` are left untouched.
pub fn merge_handler_config(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        let merged = match (base.get(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                let mut combined = existing.clone();
                merge_handler_config(&mut combined, incoming);
                Value::Object(combined)
            }
            _ => value.clone(),
        };
        base.insert(key.clone(), merged);
    }
}
