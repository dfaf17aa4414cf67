//! Failure ledger
//!
//! Every failed entry is written twice: a human-readable line in the log
//! file, and a tab-separated row in the failed-entries file. The row keeps
//! the manifest columns after a `----` separator, so the file can be fed
//! back to the parser with failed rows enabled.

use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{error, warn};

use crate::install::error::InstallError;
use crate::manifest::{ManifestEntry, PathRule, FAILED_ROW_TOKEN};

/// Where a failure was raised
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub file: String,
    pub function: String,
}

impl Origin {
    pub fn new<F: Into<String>, N: Into<String>>(file: F, function: N) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
        }
    }
}

/// Append-only record of failed entries
#[derive(Debug, Clone)]
pub struct FailureLedger {
    pub log_path: PathBuf,
    pub failed_entries_path: PathBuf,
}

impl FailureLedger {
    pub fn new<L: Into<PathBuf>, F: Into<PathBuf>>(log_path: L, failed_entries_path: F) -> Self {
        Self {
            log_path: log_path.into(),
            failed_entries_path: failed_entries_path.into(),
        }
    }

    /// Record one failure
    ///
    /// Ledger write errors are logged and otherwise ignored; the entry is
    /// always added to `failures`.
    pub async fn record(
        &self,
        failures: &mut Vec<ManifestEntry>,
        entry: &ManifestEntry,
        failure: &InstallError,
        origin: &Origin,
    ) {
        let name = entry.full_file_name(true);
        let message = failure.to_string();
        error!(
            entry = %name,
            file = %origin.file,
            function = %origin.function,
            category = %failure.category(),
            suggestion = failure.suggestion().unwrap_or("none"),
            "{}",
            message
        );

        let log_line = Self::log_line(entry, &message, origin);
        if let Err(e) = append(&self.log_path, &log_line).await {
            warn!("Could not write to {}: {}", self.log_path.display(), e);
        }

        failures.push(entry.clone());

        let row = Self::failed_row(entry);
        if let Err(e) = append(&self.failed_entries_path, &row).await {
            warn!("Could not write to {}: {}", self.failed_entries_path.display(), e);
        }
    }

    /// Log file line for a failure
    pub fn log_line(entry: &ManifestEntry, message: &str, origin: &Origin) -> String {
        format!(
            "error in file \"{}\" in function \"{}\" with mod \"{}\" -> {}\n",
            origin.file,
            origin.function,
            entry.full_file_name(true),
            message
        )
    }

    /// Failed-entries row for a failure
    pub fn failed_row(entry: &ManifestEntry) -> String {
        let link = entry.link().map(|link| link.url()).unwrap_or_default();
        let rules = PathRule::join_list(entry.inner_paths());
        let (creator, out_name, original_link, note) = match entry {
            ManifestEntry::Standard(standard) => (
                standard.creator_name.as_str(),
                standard.out_name.as_str(),
                standard.original_link.as_str(),
                standard.note.as_str(),
            ),
            ManifestEntry::Custom(custom) => ("", custom.out_name.as_str(), "", ""),
            ManifestEntry::Marker(marker) => ("", marker.name.as_str(), "", ""),
        };

        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            entry.full_file_name(true),
            FAILED_ROW_TOKEN,
            link,
            rules,
            creator,
            out_name,
            original_link,
            note
        )
    }
}

async fn append(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(text.as_bytes()).await?;
    file.flush().await
}
