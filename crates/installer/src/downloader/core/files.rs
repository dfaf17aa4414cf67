//! File naming and directory helpers for downloads

use std::path::Path;
use tokio::fs;

use crate::downloader::core::{DownloadError, FileOperation, Result};

/// Extension used when the server declares a content type we cannot extract
pub const UNKNOWN_EXTENSION: &str = ".ERROR";

/// Content-type fragments and the archive extension they map to, checked in order
const ARCHIVE_TYPES: [(&str, &str); 4] = [
    ("application/zip", ".zip"),
    ("application/x-7z-compressed", ".7z"),
    ("application/x-rar-compressed", ".rar"),
    ("application/vnd.rar", ".rar"),
];

/// Map a declared content type to the archive extension used on disk
///
/// Matching is by containment so parameters such as `; charset=binary`
/// do not matter. Anything unrecognized maps to [`UNKNOWN_EXTENSION`].
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    ARCHIVE_TYPES
        .iter()
        .find(|(mime, _)| content_type.contains(mime))
        .map(|(_, extension)| *extension)
        .unwrap_or(UNKNOWN_EXTENSION)
}

/// Create a directory and its parents, idempotent
pub async fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await.map_err(|e| DownloadError::FileSystem {
        path: path.to_path_buf(),
        operation: FileOperation::CreateDir,
        source: e,
    })
}
