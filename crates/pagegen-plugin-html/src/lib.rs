//! HTML entry plugin for pagegen.
//!
//! At `emit` time the plugin reads the compiled script's filename from the
//! build configuration, renders an HTML document that loads it, and writes
//! the document into the compilation's asset table as `index.html`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pagegen_bundler::{AssetTable, BuildConfiguration, Compiler, RawSource};
//! use pagegen_plugin_html::HtmlPlugin;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut compiler = Compiler::new(BuildConfiguration::default());
//! compiler.apply(&HtmlPlugin::new())?;
//!
//! let mut assets = AssetTable::new();
//! assets.insert("bundle.js", RawSource::from("console.log('hi')"));
//! compiler.run(assets).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Rendering on its own is a pure function:
//!
//! ```rust
//! use pagegen_bundler::SourceExt;
//! use pagegen_plugin_html::synthesize;
//!
//! let doc = synthesize("bundle.js");
//! assert!(doc.as_str().contains(r#"<script src="bundle.js"></script>"#));
//! assert_eq!(doc.size(), doc.as_str().len());
//! ```

mod config;
mod error;
mod plugin;
mod template;

pub use config::{HtmlPluginOptions, TemplateSource};
pub use error::HtmlError;
pub use plugin::{HtmlPlugin, PLUGIN_NAME, Registration};
pub use template::{HtmlDocument, HtmlSynthesizer, synthesize};
