//! Plugin trait.
//!
//! A plugin is anything that registers handlers on a [`Compiler`]. It is
//! applied once, before the first compilation, and decides for itself which
//! registration style to use.

use std::borrow::Cow;

use crate::{Compiler, Result};

pub trait Plugin {
    /// Returns the plugin name for diagnostics and logging
    fn name(&self) -> Cow<'static, str>;

    /// Register this plugin's handlers on `compiler`.
    fn apply(&self, compiler: &mut Compiler) -> Result<()>;
}
