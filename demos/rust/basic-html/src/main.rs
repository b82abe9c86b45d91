//! Basic HTML Example
//!
//! Runs the pipeline once with a single compiled script and lets
//! `HtmlPlugin` add an `index.html` that loads it.
//!
//! ## What This Shows
//!
//! - Loading `pagegen.toml` / `PAGEGEN_*` configuration
//! - Seeding the asset table with the compiled output
//! - Attaching a plugin to the `emit` hook
//! - Writing the table to `output.path`
//!
//! Pick the registration style with the first argument: `tap` (default),
//! `tap-async` or `legacy`.

use anyhow::{Result, bail};
use pagegen_bundler::{AssetTable, Compiler, LogLevel, RawSource, init_logging};
use pagegen_plugin_html::{HtmlPlugin, Registration};

#[tokio::main]
async fn main() -> Result<()> {
    let config = pagegen_config::discover(".")?;

    let level = match config.settings.log_level.as_deref() {
        Some(level) => level.parse::<LogLevel>().map_err(anyhow::Error::msg)?,
        None => LogLevel::Info,
    };
    init_logging(level);

    let registration = match std::env::args().nth(1).as_deref() {
        None | Some("tap") => Registration::Tap,
        Some("tap-async") => Registration::TapAsync,
        Some("legacy") => Registration::Legacy,
        Some(other) => bail!("unknown registration style '{other}'"),
    };

    println!("📦 Basic HTML Example");
    println!("=====================\n");

    let plugin = HtmlPlugin::from_config(&config).registration(registration);
    let mut compiler = Compiler::new(config);
    compiler.apply(&plugin)?;

    // Stands in for the bundler's compiled output
    let mut assets = AssetTable::new();
    assets.insert(
        compiler.options().output.filename.clone(),
        RawSource::from("document.body.textContent = 'Hello from pagegen';\n"),
    );

    let stats = compiler.run(assets).await?;

    println!("✅ Build complete ({registration:?})\n");
    println!("📊 Wrote to {}:", stats.output_path().display());
    for asset in stats.assets() {
        println!("   • {} ({} bytes)", asset.name, asset.size);
    }

    Ok(())
}
