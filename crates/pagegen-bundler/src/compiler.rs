//! The pipeline driver.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use pagegen_config::{BuildConfiguration, validate_schema};

use crate::assets::AssetTable;
use crate::compilation::Compilation;
use crate::hooks::{Completion, HookEvent, Hooks};
use crate::output::writer::write_assets_to;
use crate::plugins::Plugin;
use crate::source::SourceExt;
use crate::Result;

/// Drives compilations through the lifecycle:
/// `compilation` → `emit` → write → `after-emit` → `done`.
///
/// # Example
///
/// ```no_run
/// use pagegen_bundler::{AssetTable, BuildConfiguration, Compiler, RawSource};
///
/// # async fn example() -> pagegen_bundler::Result<()> {
/// let mut compiler = Compiler::new(BuildConfiguration::default());
///
/// compiler.plugin("emit", |compilation, completion| {
///     compilation.emit_asset("robots.txt", RawSource::from("User-agent: *"));
///     completion.done();
/// })?;
///
/// let compilation = compiler.compile(AssetTable::new()).await?;
/// assert!(compilation.assets().contains("robots.txt"));
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct Compiler {
    options: Arc<BuildConfiguration>,
    pub hooks: Hooks,
    /// Name of the plugin whose `apply` is running, if any
    applying: Option<Cow<'static, str>>,
}

impl Compiler {
    pub fn new(options: impl Into<Arc<BuildConfiguration>>) -> Self {
        Self {
            options: options.into(),
            hooks: Hooks::new(),
            applying: None,
        }
    }

    pub fn options(&self) -> &BuildConfiguration {
        &self.options
    }

    /// Apply a plugin, letting it register its handlers.
    pub fn apply<P: Plugin + ?Sized>(&mut self, plugin: &P) -> Result<()> {
        let name = plugin.name();
        tracing::debug!(plugin = %name, "applying plugin");

        let outer = self.applying.replace(name);
        let result = plugin.apply(self);
        self.applying = outer;
        result
    }

    /// Register a single callback against `event_name`.
    ///
    /// The handler receives the compilation and a [`Completion`]; the
    /// pipeline does not advance until it is signalled. Registering against
    /// an event the pipeline never fires is an error rather than a handler
    /// that silently never runs.
    ///
    /// Called from [`Plugin::apply`], the handler is named after the plugin;
    /// otherwise it is named `plugin:<event>`.
    pub fn plugin<F>(&mut self, event_name: &str, handler: F) -> Result<()>
    where
        F: Fn(&mut Compilation, Completion) + Send + Sync + 'static,
    {
        let event: HookEvent = event_name.parse().inspect_err(|_| {
            tracing::warn!(event = event_name, "handler registered against unknown lifecycle event");
        })?;
        let name = match &self.applying {
            Some(plugin) => plugin.to_string(),
            None => format!("plugin:{event}"),
        };
        self.hooks.get_mut(event).tap_async(name, handler);
        Ok(())
    }

    /// Run the `compilation` and `emit` hooks over the compiled output.
    ///
    /// Returns the compilation with its final asset table; nothing is written.
    /// The configuration is validated before any handler runs.
    pub async fn compile(&self, assets: AssetTable) -> Result<Compilation> {
        validate_schema(&self.options)?;

        let timeout = self.options.pipeline.completion_timeout();
        let mut compilation = Compilation::with_assets(Arc::clone(&self.options), assets);

        tracing::debug!(
            mode = %self.options.mode,
            script = %self.options.output.filename,
            assets = compilation.assets().len(),
            "starting compilation"
        );

        self.hooks.compilation.call(&mut compilation, timeout).await?;
        self.hooks.emit.call(&mut compilation, timeout).await?;

        Ok(compilation)
    }

    /// Compile, write the asset table to `output.path`, then run the
    /// `after-emit` and `done` hooks.
    ///
    /// The returned [`Stats`] describe what was written; assets added by
    /// later hooks are not included.
    pub async fn run(&self, assets: AssetTable) -> Result<Stats> {
        let timeout = self.options.pipeline.completion_timeout();
        let mut compilation = self.compile(assets).await?;

        let output = &self.options.output;
        write_assets_to(compilation.assets(), &output.path, output.overwrite)?;
        tracing::info!(
            dir = %output.path.display(),
            assets = compilation.assets().len(),
            "assets written"
        );
        let stats = Stats::new(output.path.clone(), compilation.assets());

        self.hooks.after_emit.call(&mut compilation, timeout).await?;
        self.hooks.done.call(&mut compilation, timeout).await?;

        Ok(stats)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    output_path: PathBuf,
    assets: Vec<AssetStat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStat {
    pub name: String,
    pub size: usize,
}

impl Stats {
    fn new(output_path: PathBuf, assets: &AssetTable) -> Self {
        Self {
            output_path,
            assets: assets
                .iter()
                .map(|(name, entry)| AssetStat {
                    name: name.to_string(),
                    size: entry.size(),
                })
                .collect(),
        }
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Written assets in table order.
    pub fn assets(&self) -> &[AssetStat] {
        &self.assets
    }

    pub fn get(&self, name: &str) -> Option<&AssetStat> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}
