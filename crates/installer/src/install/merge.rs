//! Merging extracted files into their destination
//!
//! Two copy shapes are used. [`copy_root`] takes only the regular files
//! sitting directly in a directory. [`copy_if_exists`] copies a whole tree
//! and quietly does nothing when the source is missing. Both overwrite.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use crate::install::error::InstallError;

/// Subdirectories merged recursively from every rule directory when present
pub const OPTIONAL_SUBDIRECTORIES: [&str; 5] = ["gamedata", "fomod", "db", "tools", "appdata"];

fn copy_error(from: &Path, to: &Path, source: io::Error) -> InstallError {
    InstallError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    }
}

/// Copy the regular files directly inside `from` into `to`
///
/// Subdirectories are not descended into. `to` is created when needed.
/// A missing `from` is an error. Returns the number of files copied.
pub async fn copy_root(from: &Path, to: &Path) -> Result<usize, InstallError> {
    let mut entries = fs::read_dir(from).await.map_err(|e| copy_error(from, to, e))?;
    fs::create_dir_all(to).await.map_err(|e| copy_error(from, to, e))?;

    let mut copied = 0;
    while let Some(entry) = entries.next_entry().await.map_err(|e| copy_error(from, to, e))? {
        let file_type = entry.file_type().await.map_err(|e| copy_error(&entry.path(), to, e))?;
        if !file_type.is_file() {
            continue;
        }
        let target = to.join(entry.file_name());
        fs::copy(entry.path(), &target)
            .await
            .map_err(|e| copy_error(&entry.path(), &target, e))?;
        copied += 1;
    }

    debug!("Copied {} files from {} to {}", copied, from.display(), to.display());
    Ok(copied)
}

/// Recursively copy the directory `from` into `to`, overwriting
///
/// A missing (or non-directory) `from` is a no-op. Returns the number of
/// files copied.
pub async fn copy_if_exists(from: &Path, to: &Path) -> Result<usize, InstallError> {
    if !fs::metadata(from).await.map(|m| m.is_dir()).unwrap_or(false) {
        return Ok(0);
    }

    let from_owned = from.to_path_buf();
    let to_owned = to.to_path_buf();
    let copied = tokio::task::spawn_blocking(move || copy_tree(&from_owned, &to_owned))
        .await
        .map_err(|e| InstallError::Io(io::Error::other(e)))??;

    debug!("Merged {} files from {} into {}", copied, from.display(), to.display());
    Ok(copied)
}

fn copy_tree(from: &Path, to: &Path) -> Result<usize, InstallError> {
    let mut copied = 0;
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(|e| copy_error(from, to, e.into()))?;
        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target: PathBuf = to.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| copy_error(entry.path(), &target, e))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| copy_error(entry.path(), parent, e))?;
            }
            std::fs::copy(entry.path(), &target).map_err(|e| copy_error(entry.path(), &target, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Remove a file or directory tree, treating "already gone" as success
pub async fn remove_path(path: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    }
}
