//! Top-level build configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};
use crate::helpers::{
    default_completion_timeout_ms, default_output_filename, default_output_path, default_true,
};
use crate::html::HtmlOptions;
use crate::settings::GlobalSettings;

/// Read-only configuration view handed to every plugin.
///
/// # Example
///
/// ```
/// use pagegen_config::BuildConfiguration;
///
/// let config = BuildConfiguration::default();
/// assert_eq!(config.output.filename, "bundle.js");
/// assert_eq!(config.html.filename, "index.html");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub output: OutputOptions,

    #[serde(default)]
    pub html: HtmlOptions,

    #[serde(default)]
    pub pipeline: PipelineOptions,

    #[serde(default)]
    pub settings: GlobalSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

/// Where the compiled output lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Filename of the compiled script (e.g. `bundle.js`)
    #[serde(default = "default_output_filename")]
    pub filename: String,

    /// Directory the asset table is flushed to
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Replace files that already exist in `path`
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            filename: default_output_filename(),
            path: default_output_path(),
            overwrite: true,
        }
    }
}

/// Pipeline behaviour around deferred completions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// How long a deferred tap may hold the pipeline before it is reported
    /// as timed out. `None` or `0` waits forever.
    #[serde(default = "default_completion_timeout_ms")]
    pub completion_timeout_ms: Option<u64>,
}

impl PipelineOptions {
    pub fn completion_timeout(&self) -> Option<Duration> {
        self.completion_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            completion_timeout_ms: default_completion_timeout_ms(),
        }
    }
}

impl BuildConfiguration {
    /// Create a configuration whose compiled script is `filename`.
    pub fn with_output_filename(filename: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.output.filename = filename.into();
        config
    }

    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use pagegen_config::BuildConfiguration;
    /// use serde_json::json;
    ///
    /// let config = BuildConfiguration::from_value(json!({
    ///     "output": { "filename": "app.js" }
    /// }))
    /// .unwrap();
    /// assert_eq!(config.output.filename, "app.js");
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }
}
