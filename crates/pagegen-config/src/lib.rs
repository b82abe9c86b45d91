//! Build configuration for pagegen.
//!
//! [`BuildConfiguration`] is the read-only view a plugin sees of the build:
//! where output goes, what the compiled script is called, and how the
//! pipeline treats deferred completions. It is created once per compilation
//! and shared behind an `Arc`.

pub mod config;
pub mod discovery;
pub mod error;
pub mod html;
pub mod settings;
pub mod validation;

mod helpers;

// Re-export main types
pub use config::*;
pub use error::*;
pub use html::*;
pub use settings::*;

pub use discovery::{ConfigDiscovery, discover};
pub use validation::{ConfigValidator, SchemaValidator, validate_schema};
