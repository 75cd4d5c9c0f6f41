use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Copies `source` into `dest` recursively.
///
/// Returns `Ok(false)` without touching `dest` when `source` does not
/// exist; resource directories are optional per product. Files keep their
/// permission bits.
pub fn copy_dir(source: &Path, dest: &Path) -> Result<bool, DeployError> {
    if !source.is_dir() {
        tracing::debug!(path = %source.display(), "no resource directory, skipping");
        return Ok(false);
    }

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| DeployError::Walk {
            path: source.to_path_buf(),
            source: e,
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| DeployError::OutsideSource {
                path: entry.path().to_path_buf(),
                source: e,
            })?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| DeployError::CreateDir {
                path: target.clone(),
                source: e,
            })?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    Ok(true)
}

/// Copies one file over `dest`, replacing any previous copy.
pub fn copy_file(source: &Path, dest: &Path) -> Result<(), DeployError> {
    // std::fs::copy carries the permission bits over.
    std::fs::copy(source, dest).map_err(|e| DeployError::CopyFile {
        from: source.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to copy {from} to {to}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to walk resource directory {path}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("{path} is outside of the resource directory")]
    OutsideSource {
        path: PathBuf,
        source: std::path::StripPrefixError,
    },
}
