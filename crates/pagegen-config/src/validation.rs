//! Pluggable config validation strategies

use std::path::{Component, Path};

use crate::config::BuildConfiguration;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfiguration) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use pagegen_config::{BuildConfiguration, ConfigValidator, SchemaValidator};
///
/// let config = BuildConfiguration::default();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfiguration) -> Result<()> {
        let filename = &config.output.filename;
        if filename.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "output.filename cannot be empty".to_string(),
                hint: Some("Set output.filename to the compiled script, e.g. \"bundle.js\"".to_string()),
            });
        }
        if filename.contains('\0') {
            return Err(ConfigError::SchemaValidation {
                message: "output.filename contains a null byte".to_string(),
                hint: None,
            });
        }

        let html = &config.html.filename;
        if html.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "html.filename cannot be empty".to_string(),
                hint: Some("Use the default \"index.html\" or another asset name".to_string()),
            });
        }
        if escapes_output_dir(Path::new(html)) {
            return Err(ConfigError::SchemaValidation {
                message: format!("html.filename '{html}' escapes the output directory"),
                hint: Some("Use a relative name without '..' components".to_string()),
            });
        }

        if config.html.lang.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "html.lang".to_string(),
                hint: Some("Use a BCP 47 tag such as \"en\"".to_string()),
            });
        }

        Ok(())
    }
}

fn escapes_output_dir(path: &Path) -> bool {
    path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Convenience wrapper around [`SchemaValidator`].
pub fn validate_schema(config: &BuildConfiguration) -> Result<()> {
    SchemaValidator.validate(config)
}
