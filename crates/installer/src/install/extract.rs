//! Archive extraction

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::install::error::InstallError;

/// Unpacks an archive into a directory, creating the directory
#[async_trait]
pub trait ArchiveExtractor: Send + Sync {
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<(), InstallError>;
}

/// Extracts with an external 7-Zip binary, which handles zip, 7z and rar alike
#[derive(Debug, Clone)]
pub struct SevenZipExtractor {
    pub binary: PathBuf,
}

impl SevenZipExtractor {
    pub fn new<P: Into<PathBuf>>(binary: P) -> Self {
        Self { binary: binary.into() }
    }
}

impl Default for SevenZipExtractor {
    fn default() -> Self {
        Self::new("7z")
    }
}

#[async_trait]
impl ArchiveExtractor for SevenZipExtractor {
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<(), InstallError> {
        tokio::fs::create_dir_all(dest)
            .await
            .map_err(|e| InstallError::CreateDir {
                path: dest.to_path_buf(),
                source: e,
            })?;

        debug!("Extracting {} into {}", archive.display(), dest.display());
        let output = Command::new(&self.binary)
            .arg("x")
            .arg("-y")
            .arg(format!("-o{}", dest.display()))
            .arg(archive)
            .output()
            .await
            .map_err(|e| InstallError::Extraction {
                archive: archive.to_path_buf(),
                reason: format!("could not run {}: {}", self.binary.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InstallError::Extraction {
                archive: archive.to_path_buf(),
                reason: format!("{} exited with {}: {}", self.binary.display(), output.status, stderr.trim()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = SevenZipExtractor::new(dir.path().join("no-such-7z"));
        let archive = dir.path().join("a.7z");

        match extractor.extract(&archive, &dir.path().join("out")).await {
            Err(InstallError::Extraction { archive: failed, .. }) => assert_eq!(failed, archive),
            other => panic!("Expected Extraction error, got {:?}", other),
        }
        assert!(dir.path().join("out").is_dir());
    }
}
