//! Asset sources.
//!
//! An asset is anything that can produce its bytes on demand. The reported
//! size is never stored separately: [`SourceExt::size`] is implemented once
//! for every [`Source`] and measures [`Source::content`], so the two cannot
//! drift apart.

use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

/// Lazily rendered asset content.
pub trait Source: Debug + Send + Sync {
    /// The bytes written to disk for this asset.
    fn content(&self) -> Cow<'_, [u8]>;
}

/// Accessors derived from [`Source::content`].
///
/// Blanket-implemented for every source and cannot be overridden.
pub trait SourceExt: Source {
    /// Byte length of [`Source::content`].
    fn size(&self) -> usize {
        self.content().len()
    }

    /// Content as UTF-8 text, if it is valid UTF-8.
    fn text(&self) -> Option<String> {
        String::from_utf8(self.content().into_owned()).ok()
    }
}

impl<T: Source + ?Sized> SourceExt for T {}

/// An entry in the asset table.
pub type AssetEntry = Arc<dyn Source>;

/// In-memory source holding its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    bytes: Arc<[u8]>,
}

impl RawSource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl Source for RawSource {
    fn content(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.bytes)
    }
}

impl From<&str> for RawSource {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for RawSource {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for RawSource {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_counts_bytes_not_chars() {
        let source = RawSource::from("héllo");
        assert_eq!(source.size(), 6);
        assert_eq!(source.content().len(), source.size());
    }

    #[test]
    fn test_empty_source() {
        let source = RawSource::from(Vec::new());
        assert_eq!(source.size(), 0);
        assert_eq!(source.text().as_deref(), Some(""));
    }

    #[test]
    fn test_size_through_trait_object() {
        let entry: AssetEntry = Arc::new(RawSource::from("abc"));
        assert_eq!(entry.size(), 3);
        assert_eq!(entry.text().as_deref(), Some("abc"));
    }

    #[test]
    fn test_non_utf8_text() {
        let source = RawSource::from(vec![0xff, 0xfe]);
        assert_eq!(source.size(), 2);
        assert!(source.text().is_none());
    }
}
