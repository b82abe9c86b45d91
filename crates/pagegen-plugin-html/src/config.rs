//! HTML plugin configuration types

use std::path::PathBuf;

use pagegen_config::HtmlOptions;

/// Where a custom template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Inline(String),
    File(PathBuf),
}

/// Configuration for the HTML entry document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPluginOptions {
    /// Asset name the document is written under
    pub filename: String,

    /// Contents of `<title>`
    pub title: String,

    /// `lang` attribute of `<html>`
    pub lang: String,

    /// Custom template; the built-in document is used when `None`
    pub template: Option<TemplateSource>,
}

impl Default for HtmlPluginOptions {
    fn default() -> Self {
        Self::from(&HtmlOptions::default())
    }
}

impl From<&HtmlOptions> for HtmlPluginOptions {
    fn from(options: &HtmlOptions) -> Self {
        Self {
            filename: options.filename.clone(),
            title: options.title.clone(),
            lang: options.lang.clone(),
            template: options.template.clone().map(TemplateSource::File),
        }
    }
}

impl HtmlPluginOptions {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset name (default: "index.html")
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Use an inline Jinja2 template
    pub fn with_template(mut self, source: impl Into<String>) -> Self {
        self.template = Some(TemplateSource::Inline(source.into()));
        self
    }

    /// Use a Jinja2 template read from disk at emit time
    ///
    /// Only [`Registration::TapAsync`](crate::Registration::TapAsync) reads it
    /// without blocking.
    pub fn with_template_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(TemplateSource::File(path.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = HtmlPluginOptions::default();
        assert_eq!(options.filename, "index.html");
        assert_eq!(options.title, "Document");
        assert_eq!(options.lang, "en");
        assert!(options.template.is_none());
    }

    #[test]
    fn test_from_config_template_is_file() {
        let html = HtmlOptions {
            template: Some(PathBuf::from("templates/entry.html")),
            ..HtmlOptions::default()
        };
        let options = HtmlPluginOptions::from(&html);
        assert_eq!(
            options.template,
            Some(TemplateSource::File(PathBuf::from("templates/entry.html")))
        );
    }
}
