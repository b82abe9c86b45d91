//! Secure file writing for the final asset table.
//!
//! - **Path Validation**: asset names may not escape the output directory
//! - **Atomic Writes**: content goes to a temp file first, then is renamed
//! - **Cleanup**: if any write fails, leftover temp files are removed
//! - **Directory Creation**: parent directories are created as needed
//!
//! A failure while writing temp files leaves existing outputs untouched. A
//! failure during the rename phase is not rolled back: assets renamed before
//! it stay in place.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::assets::AssetTable;
use crate::{Error, Result};

/// Writes every asset in `assets` under `dir`.
///
/// # Arguments
///
/// * `assets` - The final asset table of a compilation
/// * `dir` - Target directory for output files
/// * `overwrite` - If `true`, overwrites existing files; if `false`, errors on conflicts
///
/// # Errors
///
/// - An asset name escapes `dir` or contains a null byte
/// - A file already exists and `overwrite` is `false`
/// - Any I/O operation fails
///
/// # Examples
///
/// ```no_run
/// use pagegen_bundler::{AssetTable, RawSource};
/// use pagegen_bundler::output::write_assets_to;
/// use std::path::Path;
///
/// # fn example() -> pagegen_bundler::Result<()> {
/// let mut assets = AssetTable::new();
/// assets.insert("bundle.js", RawSource::from("console.log(1)"));
/// write_assets_to(&assets, Path::new("dist"), true)?;
/// # Ok(())
/// # }
/// ```
pub fn write_assets_to(assets: &AssetTable, dir: &Path, overwrite: bool) -> Result<()> {
    let dir = validate_and_normalize_dir(dir)?;

    fs::create_dir_all(&dir).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    // Validate everything before touching the filesystem
    let mut operations = Vec::with_capacity(assets.len());
    for (name, entry) in assets.iter() {
        let target_path = validate_output_path(&dir, name)?;

        if !overwrite && target_path.exists() {
            return Err(Error::OutputExists(format!(
                "File already exists: '{}'. Use overwrite=true to replace.",
                target_path.display()
            )));
        }

        operations.push((target_path, entry.content()));
    }

    write_files_atomic(&operations)
}

/// Normalizes the output directory and makes it absolute.
fn validate_and_normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();

    if cleaned.is_absolute() {
        return Ok(cleaned);
    }

    let cwd = std::env::current_dir().map_err(|e| {
        Error::InvalidOutputPath(format!("Failed to get current directory: {}", e))
    })?;
    Ok(cwd.join(&cleaned).clean())
}

/// Resolves an asset name under `base_dir`, rejecting anything that escapes it.
///
/// Catches `../../etc/passwd`, absolute names and `dir/../../x` alike: the
/// joined path is cleaned and must still start with `base_dir`.
fn validate_output_path(base_dir: &Path, name: &str) -> Result<PathBuf> {
    if name.contains('\0') {
        return Err(Error::InvalidOutputPath(format!(
            "Asset name contains null byte: {:?}",
            name
        )));
    }

    if name.is_empty() {
        return Err(Error::InvalidOutputPath("Asset name is empty".to_string()));
    }

    let full_path = base_dir.join(Path::new(name).clean()).clean();

    if !full_path.starts_with(base_dir) || full_path == base_dir {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            name,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

/// Two-phase write: everything to `*.tmp` first, then rename into place.
fn write_files_atomic<C: AsRef<[u8]>>(operations: &[(PathBuf, C)]) -> Result<()> {
    let mut temp_files = Vec::new();

    for (target_path, content) in operations {
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_temp_files(&temp_files);
                Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = temp_path_for(target_path);
        fs::write(&temp_path, content.as_ref()).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to write temporary file '{}': {}",
                temp_path.display(),
                e
            ))
        })?;

        temp_files.push((temp_path, target_path.clone()));
    }

    for (temp_path, target_path) in &temp_files {
        fs::rename(temp_path, target_path).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to rename '{}' to '{}': {}",
                temp_path.display(),
                target_path.display(),
                e
            ))
        })?;
    }

    Ok(())
}

/// `index.html` → `index.html.tmp`, keeping the original extension so
/// `bundle.js` and `bundle.css` never share a temp file.
fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Best-effort cleanup; we're already in an error state.
fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in temp_files {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                tracing::warn!(
                    path = %temp_path.display(),
                    error = %e,
                    "failed to clean up temporary file"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_output_path_normal() {
        let base = Path::new("/tmp/output");
        let result = validate_output_path(base, "index.html");
        assert_eq!(result.unwrap(), Path::new("/tmp/output/index.html"));
    }

    #[test]
    fn test_validate_output_path_nested() {
        let base = Path::new("/tmp/output");
        let result = validate_output_path(base, "pages/index.html");
        assert_eq!(result.unwrap(), Path::new("/tmp/output/pages/index.html"));
    }

    #[test]
    fn test_validate_output_path_traversal_simple() {
        let base = Path::new("/tmp/output");
        let result = validate_output_path(base, "../etc/passwd");
        assert!(matches!(result.unwrap_err(), Error::InvalidOutputPath(_)));
    }

    #[test]
    fn test_validate_output_path_traversal_complex() {
        let base = Path::new("/tmp/output");
        assert!(validate_output_path(base, "safe/../../../../../../etc/passwd").is_err());
    }

    #[test]
    fn test_validate_output_path_null_byte() {
        let base = Path::new("/tmp/output");
        assert!(validate_output_path(base, "file\0name.js").is_err());
    }

    #[test]
    fn test_validate_output_path_rejects_directory_itself() {
        let base = Path::new("/tmp/output");
        assert!(validate_output_path(base, ".").is_err());
        assert!(validate_output_path(base, "").is_err());
    }

    #[test]
    fn test_validate_output_path_current_dir() {
        let base = Path::new("/tmp/output");
        let result = validate_output_path(base, "./index.html");
        assert_eq!(result.unwrap(), Path::new("/tmp/output/index.html"));
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(
            temp_path_for(Path::new("/out/bundle.js")),
            Path::new("/out/bundle.js.tmp")
        );
    }
}
