//! Flushing the asset table to disk.

pub mod writer;

pub use writer::write_assets_to;
