//! File-based config discovery
//!
//! Layers configuration the same way for every caller:
//! defaults, then `pagegen.toml` (or the `pagegen` field of `package.json`),
//! then `PAGEGEN_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde_json::Value;

use crate::config::BuildConfiguration;
use crate::error::Result;
use crate::validation::{ConfigValidator, SchemaValidator};

/// Environment prefix; nested keys are separated by a double underscore,
/// e.g. `PAGEGEN_OUTPUT__FILENAME=app.js`.
pub const ENV_PREFIX: &str = "PAGEGEN_";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use pagegen_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load().unwrap();
/// println!("script: {}", config.output.filename);
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: pagegen.toml
    /// 2. package.json (pagegen field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join("pagegen.toml");
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get("pagegen").is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Build the layered figment without extracting it.
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(BuildConfiguration::default()));

        match self.find() {
            Some(path) if path.file_name() == Some(std::ffi::OsStr::new("package.json")) => {
                tracing::debug!(path = %path.display(), "loading config from package.json");
                figment = figment.merge(Figment::from(Json::file(path)).focus("pagegen"));
            }
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                figment = figment.merge(Toml::file(path));
            }
            None => {
                tracing::debug!(root = %self.root.display(), "no config file found, using defaults");
            }
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> Result<BuildConfiguration> {
        let config: BuildConfiguration = self.figment().extract()?;
        SchemaValidator.validate(&config)?;
        Ok(config)
    }
}

/// Discover and load configuration rooted at `root`.
pub fn discover(root: impl AsRef<Path>) -> Result<BuildConfiguration> {
    ConfigDiscovery::new(root).load()
}
