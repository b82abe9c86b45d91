use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::helpers::{default_html_filename, default_lang, default_title};

/// HTML entry document options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlOptions {
    /// Asset name of the generated document (default: "index.html")
    #[serde(default = "default_html_filename")]
    pub filename: String,

    /// Page title (default: "Document")
    #[serde(default = "default_title")]
    pub title: String,

    /// Language attribute for <html> tag (default: "en")
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Path to a custom template (Jinja2 format)
    /// If not provided, the built-in document is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            filename: default_html_filename(),
            title: default_title(),
            lang: default_lang(),
            template: None,
        }
    }
}
