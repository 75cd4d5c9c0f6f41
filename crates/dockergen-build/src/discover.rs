use std::path::{Path, PathBuf};

/// Matches version directories such as `3.0.25` or `7.2.0-staging`.
const VERSION_DIR_GLOB: &str = "[0-9]*.[0-9]*.[0-9]*";

/// Lists version directory names directly under `dir`, sorted.
///
/// A missing `dir` yields an empty list; not every edition ships every
/// product.
pub fn version_subdirectories(dir: &Path) -> Result<Vec<String>, DiscoverError> {
    let pattern = format!(
        "{}/{VERSION_DIR_GLOB}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    tracing::debug!(pattern = %pattern, "scanning for version directories");

    let entries = glob::glob(&pattern).map_err(|e| DiscoverError::Pattern {
        pattern: pattern.clone(),
        source: e,
    })?;

    let mut versions = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DiscoverError::Read {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = path.file_name() {
            versions.push(name.to_string_lossy().into_owned());
        }
    }
    versions.sort();
    Ok(versions)
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("invalid discovery pattern {pattern}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
