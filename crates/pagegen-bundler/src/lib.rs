#![cfg_attr(docsrs, feature(doc_cfg))]

//! # pagegen-bundler
//!
//! The pipeline core plugins attach to. A [`Compiler`] owns the lifecycle
//! [`Hooks`]; each [`Compiler::compile`] call creates a [`Compilation`] that
//! carries the read-only [`BuildConfiguration`] and the mutable
//! [`AssetTable`], lends it to every registered handler in order, and hands
//! the result to the output writer.
//!
//! Two registration styles are supported:
//!
//! - **Named taps** (`compiler.hooks.emit.tap(..)`): the pipeline moves on
//!   when the handler returns. `tap_async` hands the handler a
//!   [`Completion`] that must be signalled instead.
//! - **Single callback** (`compiler.plugin("emit", ..)`): the handler always
//!   receives a [`Completion`] and the pipeline waits for it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagegen_bundler::{AssetTable, BuildConfiguration, Compiler, RawSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut compiler = Compiler::new(BuildConfiguration::default());
//!
//! compiler.hooks.emit.tap("Banner", |compilation| {
//!     compilation.emit_asset("LICENSE.txt", RawSource::from("MIT"));
//!     Ok(())
//! });
//!
//! let mut assets = AssetTable::new();
//! assets.insert("bundle.js", RawSource::from("console.log('hi')"));
//!
//! let stats = compiler.run(assets).await?;
//! for asset in stats.assets() {
//!     println!("{} ({} bytes)", asset.name, asset.size);
//! }
//! # Ok(()) }
//! ```

pub mod assets;
pub mod compilation;
pub mod compiler;
pub mod hooks;
pub mod output;
pub mod plugins;
pub mod source;

pub use assets::AssetTable;
pub use compilation::Compilation;
pub use compiler::{AssetStat, Compiler, Stats};
pub use hooks::{Completion, Hook, HookEvent, Hooks, Outcome, PendingCompletion, Subscriber};
pub use plugins::Plugin;
pub use source::{AssetEntry, RawSource, Source, SourceExt};

// Configuration is part of the plugin-facing API
pub use pagegen_config::BuildConfiguration;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging};

use std::time::Duration;

/// Error types for pagegen-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A handler was registered against an event the pipeline never fires.
    #[error("Unknown lifecycle event '{0}'")]
    UnknownHook(String),

    /// A tap returned an error or failed its completion.
    #[error("Plugin '{plugin}' failed during {hook}: {source}")]
    Plugin {
        plugin: String,
        hook: HookEvent,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A deferred tap dropped its completion without signalling it.
    #[error("Plugin '{plugin}' dropped its completion during {hook} without signalling it")]
    CompletionDropped { plugin: String, hook: HookEvent },

    /// A deferred tap did not signal its completion in time.
    #[error("Plugin '{plugin}' did not signal completion during {hook} within {timeout:?}")]
    CompletionTimeout {
        plugin: String,
        hook: HookEvent,
        timeout: Duration,
    },

    /// The build configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] pagegen_config::ConfigError),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// Output file already exists and overwrite is disabled.
    #[error("Output exists: {0}")]
    OutputExists(String),
}

/// Result type alias for pagegen-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn plugin(plugin: &str, hook: HookEvent, source: anyhow::Error) -> Self {
        Error::Plugin {
            plugin: plugin.to_string(),
            hook,
            source: source.into(),
        }
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::UnknownHook(_) => "UNKNOWN_HOOK",
            Error::Plugin { .. } => "PLUGIN_ERROR",
            Error::CompletionDropped { .. } => "COMPLETION_DROPPED",
            Error::CompletionTimeout { .. } => "COMPLETION_TIMEOUT",
            Error::Config(_) => "INVALID_CONFIG",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::OutputExists(_) => "OUTPUT_EXISTS",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::UnknownHook(_) => Some(Box::new(format!(
                "Register against one of: {}",
                HookEvent::ALL
                    .iter()
                    .map(HookEvent::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
            Error::CompletionDropped { .. } => Some(Box::new(
                "Call `done()` or `fail()` on the completion on every code path.",
            )),
            Error::CompletionTimeout { .. } => Some(Box::new(
                "The handler started work that never signalled its completion. \
                 Raise pipeline.completion_timeout_ms if the work is legitimately slow.",
            )),
            Error::Config(_) => Some(Box::new(
                "Fix the value in pagegen.toml or the matching PAGEGEN_* variable.",
            )),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Ensure it's within the output directory and doesn't contain '..' components.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write file. Check disk space and permissions.\nError: {}",
                msg
            ))),
            Error::OutputExists(msg) => Some(Box::new(format!(
                "Output file already exists: {}\nSet output.overwrite = true to replace existing files.",
                msg
            ))),
            _ => None,
        }
    }
}
