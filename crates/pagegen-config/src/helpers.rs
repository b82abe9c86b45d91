use std::path::PathBuf;

// Helper defaults
pub(crate) fn default_output_filename() -> String {
    "bundle.js".to_string()
}

pub(crate) fn default_output_path() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_html_filename() -> String {
    "index.html".to_string()
}

pub(crate) fn default_title() -> String {
    "Document".to_string()
}

pub(crate) fn default_lang() -> String {
    "en".to_string()
}

pub(crate) fn default_completion_timeout_ms() -> Option<u64> {
    Some(30_000)
}
