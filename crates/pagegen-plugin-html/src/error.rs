//! Error types for HTML entry generation

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum HtmlError {
    /// Custom template failed to parse or render
    #[error("Failed to render HTML template: {source}")]
    #[diagnostic(
        code(pagegen::html::template),
        help("Templates may use `script_src`, `title` and `lang`")
    )]
    Template {
        #[source]
        source: minijinja::Error,
    },

    /// Template file could not be read
    #[error("Failed to read HTML template '{}': {source}", .path.display())]
    #[diagnostic(code(pagegen::html::read_template))]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<minijinja::Error> for HtmlError {
    fn from(source: minijinja::Error) -> Self {
        HtmlError::Template { source }
    }
}
