//! Manifest loading.

use crate::config::schema::Manifest;
use crate::error::{DepVerifyError, Result};
use std::fs;
use std::path::Path;

/// Load and parse a manifest file.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist.
/// Returns `ManifestParseError` if the YAML is invalid.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DepVerifyError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DepVerifyError::Io(e)
        }
    })?;

    tracing::debug!("Loaded manifest from {}", path.display());
    parse_manifest(&content, path)
}

/// Parse YAML content into a [`Manifest`].
///
/// `source_path` is only used for error reporting.
pub fn parse_manifest(content: &str, source_path: &Path) -> Result<Manifest> {
    if content.trim().is_empty() {
        return Ok(Manifest::default());
    }
    serde_yaml::from_str(content).map_err(|e| DepVerifyError::ManifestParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_manifest_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deps.yml");
        fs::write(
            &path,
            "components:\n  plugin:\n    contexts:\n      active:\n        checkers: []\n",
        )
        .unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert!(manifest.components.contains_key("plugin"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_manifest(&temp.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, DepVerifyError::ManifestNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = parse_manifest("components: [unclosed", Path::new("deps.yml")).unwrap_err();
        match err {
            DepVerifyError::ManifestParseError { path, .. } => {
                assert_eq!(path, Path::new("deps.yml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_content_is_empty_manifest() {
        let manifest = parse_manifest("  \n", Path::new("deps.yml")).unwrap();
        assert_eq!(manifest, Manifest::default());
    }
}
