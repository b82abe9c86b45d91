//! One run of the pipeline.

use std::sync::Arc;

use pagegen_config::BuildConfiguration;

use crate::assets::AssetTable;
use crate::source::{AssetEntry, Source};

/// Context handed to every lifecycle handler.
///
/// The pipeline owns the compilation for its whole duration and lends it
/// mutably to one handler at a time. Writes made by earlier handlers are
/// visible to later ones.
#[derive(Debug)]
pub struct Compilation {
    options: Arc<BuildConfiguration>,
    assets: AssetTable,
}

impl Compilation {
    pub fn new(options: Arc<BuildConfiguration>) -> Self {
        Self::with_assets(options, AssetTable::new())
    }

    pub fn with_assets(options: Arc<BuildConfiguration>, assets: AssetTable) -> Self {
        Self { options, assets }
    }

    /// Read-only build configuration.
    pub fn options(&self) -> &BuildConfiguration {
        &self.options
    }

    pub fn assets(&self) -> &AssetTable {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetTable {
        &mut self.assets
    }

    /// Shorthand for `assets_mut().insert(..)`.
    pub fn emit_asset<S: Source + 'static>(
        &mut self,
        name: impl Into<String>,
        source: S,
    ) -> Option<AssetEntry> {
        self.assets.insert(name, source)
    }

    pub fn into_assets(self) -> AssetTable {
        self.assets
    }
}
