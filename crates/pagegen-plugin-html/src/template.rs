//! Rendering the entry document.
//!
//! The filename, title and language are substituted verbatim. Nothing is
//! escaped: a script name containing `"` or `<` produces broken markup, and
//! keeping names sane is the caller's responsibility.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use pagegen_bundler::Source;

use crate::error::HtmlError;

const DEFAULT_TITLE: &str = "Document";
const DEFAULT_LANG: &str = "en";

/// A rendered HTML document.
///
/// Content and size both read the one string rendered at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    html: Arc<str>,
}

impl HtmlDocument {
    fn new(html: String) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }
}

impl Source for HtmlDocument {
    fn content(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.html.as_bytes())
    }
}

impl fmt::Display for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Render the built-in entry document loading `script_filename`.
pub fn synthesize(script_filename: &str) -> HtmlDocument {
    render_builtin(script_filename, DEFAULT_TITLE, DEFAULT_LANG)
}

fn render_builtin(script: &str, title: &str, lang: &str) -> HtmlDocument {
    HtmlDocument::new(format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <script src="{script}"></script>
</head>
<body>
</body>
</html>"#
    ))
}

/// Renders entry documents with a configurable title, language and template.
///
/// Custom templates are Jinja2 (minijinja) and see `script_src`, `title` and
/// `lang`. Autoescaping is off, matching the built-in document; referencing
/// any other variable is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlSynthesizer {
    title: String,
    lang: String,
    template: Option<String>,
}

impl Default for HtmlSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_LANG)
    }
}

impl HtmlSynthesizer {
    pub fn new(title: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lang: lang.into(),
            template: None,
        }
    }

    pub fn with_template(mut self, source: impl Into<String>) -> Self {
        self.template = Some(source.into());
        self
    }

    pub fn render(&self, script_filename: &str) -> Result<HtmlDocument, HtmlError> {
        let Some(template) = &self.template else {
            return Ok(render_builtin(script_filename, &self.title, &self.lang));
        };

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        let html = env.render_str(
            template,
            context! {
                script_src => script_filename,
                title => &self.title,
                lang => &self.lang,
            },
        )?;
        Ok(HtmlDocument::new(html))
    }
}
