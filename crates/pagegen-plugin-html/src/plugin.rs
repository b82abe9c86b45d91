//! The `emit`-time plugin.

use std::borrow::Cow;
use std::sync::Arc;

use pagegen_bundler::{BuildConfiguration, Compilation, Compiler, Plugin, SourceExt};

use crate::config::{HtmlPluginOptions, TemplateSource};
use crate::error::HtmlError;
use crate::template::{HtmlDocument, HtmlSynthesizer};

/// Tap name used for diagnostics.
pub const PLUGIN_NAME: &str = "HtmlPlugin";

/// How the plugin attaches itself to the `emit` hook.
///
/// `Tap` and `Legacy` render inside the handler, so a template file is read
/// with blocking `std::fs` on the pipeline's task. Use `TapAsync` when the
/// template lives on slow storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Registration {
    /// Named synchronous tap; the document is in the table when the tap returns
    #[default]
    Tap,
    /// Named tap with a completion; renders on a background task
    TapAsync,
    /// Single `plugin("emit", ..)` callback, completion signalled on every path
    Legacy,
}

/// Emits an HTML entry document referencing the compiled script.
///
/// # Example
///
/// ```rust
/// use pagegen_bundler::{BuildConfiguration, Compiler};
/// use pagegen_plugin_html::{HtmlPlugin, HtmlPluginOptions, Registration};
///
/// let mut compiler = Compiler::new(BuildConfiguration::default());
/// let plugin = HtmlPlugin::with_options(HtmlPluginOptions::new().with_title("My App"))
///     .registration(Registration::Legacy);
/// compiler.apply(&plugin).unwrap();
/// assert_eq!(compiler.hooks.emit.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct HtmlPlugin {
    options: Arc<HtmlPluginOptions>,
    registration: Registration,
}

impl HtmlPlugin {
    pub fn new() -> Self {
        Self::with_options(HtmlPluginOptions::default())
    }

    pub fn with_options(options: HtmlPluginOptions) -> Self {
        Self {
            options: Arc::new(options),
            registration: Registration::default(),
        }
    }

    /// Take document options from the `[html]` section of the build configuration.
    pub fn from_config(config: &BuildConfiguration) -> Self {
        Self::with_options(HtmlPluginOptions::from(&config.html))
    }

    pub fn registration(mut self, registration: Registration) -> Self {
        self.registration = registration;
        self
    }

    pub fn options(&self) -> &HtmlPluginOptions {
        &self.options
    }
}

impl Default for HtmlPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for HtmlPlugin {
    fn name(&self) -> Cow<'static, str> {
        PLUGIN_NAME.into()
    }

    fn apply(&self, compiler: &mut Compiler) -> pagegen_bundler::Result<()> {
        let options = Arc::clone(&self.options);

        match self.registration {
            Registration::Tap => {
                compiler.hooks.emit.tap(PLUGIN_NAME, move |compilation| {
                    emit_document(&options, compilation)
                });
            }
            Registration::TapAsync => {
                compiler
                    .hooks
                    .emit
                    .tap_async(PLUGIN_NAME, move |compilation, mut completion| {
                        let script = compilation.options().output.filename.clone();
                        let options = Arc::clone(&options);
                        tokio::spawn(async move {
                            match render_async(&options, &script).await {
                                Ok(doc) => {
                                    log_document(&options.filename, &script, &doc);
                                    completion.emit_asset(options.filename.clone(), doc);
                                    completion.done();
                                }
                                Err(err) => completion.fail(err),
                            }
                        });
                    });
            }
            Registration::Legacy => {
                compiler.plugin("emit", move |compilation, completion| {
                    completion.finish(emit_document(&options, compilation));
                })?;
            }
        }

        Ok(())
    }
}

fn emit_document(options: &HtmlPluginOptions, compilation: &mut Compilation) -> anyhow::Result<()> {
    let script = compilation.options().output.filename.clone();

    let template = match &options.template {
        Some(TemplateSource::File(path)) => {
            Some(std::fs::read_to_string(path).map_err(|source| HtmlError::ReadTemplate {
                path: path.clone(),
                source,
            })?)
        }
        Some(TemplateSource::Inline(source)) => Some(source.clone()),
        None => None,
    };

    let doc = synthesizer(options, template).render(&script)?;
    log_document(&options.filename, &script, &doc);
    compilation.emit_asset(options.filename.clone(), doc);
    Ok(())
}

async fn render_async(options: &HtmlPluginOptions, script: &str) -> Result<HtmlDocument, HtmlError> {
    let template = match &options.template {
        Some(TemplateSource::File(path)) => Some(tokio::fs::read_to_string(path).await.map_err(
            |source| HtmlError::ReadTemplate {
                path: path.clone(),
                source,
            },
        )?),
        Some(TemplateSource::Inline(source)) => Some(source.clone()),
        None => None,
    };

    synthesizer(options, template).render(script)
}

fn synthesizer(options: &HtmlPluginOptions, template: Option<String>) -> HtmlSynthesizer {
    let synthesizer = HtmlSynthesizer::new(options.title.clone(), options.lang.clone());
    match template {
        Some(source) => synthesizer.with_template(source),
        None => synthesizer,
    }
}

fn log_document(asset: &str, script: &str, doc: &HtmlDocument) {
    tracing::debug!(asset, script, size = doc.size(), "emitting html entry");
}
