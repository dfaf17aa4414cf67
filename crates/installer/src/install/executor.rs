//! Sequential modpack installer
//!
//! Entries are installed one at a time in manifest order. A failing entry
//! is recorded in the failure ledger and the run moves on; only a marker
//! folder that cannot be created stops the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use modpack_installer::context::RunContext;
//! use modpack_installer::downloader::{DownloadConfig, ModDownloader};
//! use modpack_installer::install::{Installer, InstallerConfig};
//! use modpack_installer::manifest::{parse_manifest_file, ManifestParser};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ctx = RunContext::new();
//! parse_manifest_file(&ManifestParser::new(), &mut ctx, std::path::Path::new("modpack_maker_list.txt")).await?;
//!
//! let downloader = ModDownloader::new(DownloadConfig::from_env())?;
//! let installer = Installer::new(InstallerConfig::new("./Anomaly"), downloader);
//! let summary = installer.run(&mut ctx).await?;
//! println!("{} installed, {} failed", summary.installed, summary.failed);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::context::RunContext;
use crate::downloader::{DownloadResult, ModDownloader};
use crate::install::error::InstallError;
use crate::install::extract::{ArchiveExtractor, SevenZipExtractor};
use crate::install::ledger::{FailureLedger, Origin};
use crate::install::merge::{copy_if_exists, copy_root, remove_path, OPTIONAL_SUBDIRECTORIES};
use crate::manifest::ManifestEntry;

/// Progress callback type for installation updates
pub type InstallProgressCallback = Arc<dyn Fn(InstallProgress) + Send + Sync>;

/// Installation progress information
#[derive(Debug, Clone)]
pub struct InstallProgress {
    pub phase: InstallPhase,
    /// 1-based position of the entry being processed
    pub current_step: usize,
    pub total_steps: usize,
    pub message: String,
}

/// Installation phases
#[derive(Debug, Clone, PartialEq)]
pub enum InstallPhase {
    Preparing,
    Downloading,
    Extracting,
    Merging,
    CleaningUp,
    Complete,
}

/// Installation configuration
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Root every other directory lives under
    pub install_path: PathBuf,
    /// Merged mods, one folder per entry
    pub mods_dir: String,
    /// Scratch space for extracted archives
    pub extracted_dir: String,
    /// Downloaded archives
    pub downloads_dir: String,
    /// Failure log; defaults to `log.txt` under the install path
    pub log_path: Option<PathBuf>,
    /// Failed-entries file; defaults to `error mod list.txt` under the install path
    pub failed_entries_path: Option<PathBuf>,
    pub optional_subdirectories: Vec<String>,
    /// 7-Zip executable used by the default extractor
    pub seven_zip: PathBuf,
}

impl InstallerConfig {
    pub fn new<P: Into<PathBuf>>(install_path: P) -> Self {
        Self {
            install_path: install_path.into(),
            ..Self::default()
        }
    }

    pub fn with_seven_zip<P: Into<PathBuf>>(mut self, binary: P) -> Self {
        self.seven_zip = binary.into();
        self
    }

    pub fn with_ledger_paths<L: Into<PathBuf>, F: Into<PathBuf>>(mut self, log_path: L, failed_entries_path: F) -> Self {
        self.log_path = Some(log_path.into());
        self.failed_entries_path = Some(failed_entries_path.into());
        self
    }

    pub fn mods_root(&self) -> PathBuf {
        self.install_path.join(&self.mods_dir)
    }

    pub fn extracted_root(&self) -> PathBuf {
        self.install_path.join(&self.extracted_dir)
    }

    pub fn downloads_root(&self) -> PathBuf {
        self.install_path.join(&self.downloads_dir)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_path.clone().unwrap_or_else(|| self.install_path.join("log.txt"))
    }

    pub fn failed_entries_file(&self) -> PathBuf {
        self.failed_entries_path
            .clone()
            .unwrap_or_else(|| self.install_path.join("error mod list.txt"))
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            install_path: PathBuf::from("."),
            mods_dir: "mods".to_string(),
            extracted_dir: "extracted".to_string(),
            downloads_dir: "downloads".to_string(),
            log_path: None,
            failed_entries_path: None,
            optional_subdirectories: OPTIONAL_SUBDIRECTORIES.iter().map(|s| s.to_string()).collect(),
            seven_zip: PathBuf::from("7z"),
        }
    }
}

/// Outcome counts of one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub installed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub markers: usize,
}

enum EntryOutcome {
    Installed,
    Skipped,
}

/// Installs the entries of a run context
pub struct Installer {
    config: InstallerConfig,
    downloader: ModDownloader,
    extractor: Box<dyn ArchiveExtractor>,
    ledger: FailureLedger,
    progress_callback: Option<InstallProgressCallback>,
}

impl Installer {
    /// Create an installer extracting with the configured 7-Zip binary
    pub fn new(config: InstallerConfig, downloader: ModDownloader) -> Self {
        let ledger = FailureLedger::new(config.log_file(), config.failed_entries_file());
        let extractor = SevenZipExtractor::new(config.seven_zip.clone());
        Self {
            config,
            downloader,
            extractor: Box::new(extractor),
            ledger,
            progress_callback: None,
        }
    }

    pub fn with_extractor<E: ArchiveExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Set a progress callback for installation updates
    pub fn with_progress_callback(mut self, callback: InstallProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    pub fn ledger(&self) -> &FailureLedger {
        &self.ledger
    }

    /// Install every entry in `ctx.entries`, in order
    ///
    /// Failed entries are appended to `ctx.failures` and written to the
    /// ledger. Only directory setup and marker folders are fatal.
    pub async fn run(&self, ctx: &mut RunContext) -> Result<RunSummary, InstallError> {
        let total = ctx.entries.len();
        self.update_progress(InstallPhase::Preparing, 0, total, "Preparing install directories".to_string());

        for dir in [self.config.mods_root(), self.config.extracted_root(), self.config.downloads_root()] {
            create_dir(&dir).await?;
        }

        let mut summary = RunSummary::default();
        for (position, entry) in ctx.entries.iter_mut().enumerate() {
            let step = position + 1;

            if entry.is_marker() {
                let folder = self.config.mods_root().join(entry.full_file_name(false));
                create_dir(&folder).await?;
                debug!("Created marker folder {}", folder.display());
                summary.markers += 1;
                continue;
            }

            info!("[{}/{}] Installing {}", step, total, entry.full_file_name(false));
            match self.install_entry(entry, step, total).await {
                Ok(EntryOutcome::Installed) => summary.installed += 1,
                Ok(EntryOutcome::Skipped) => summary.skipped += 1,
                Err(e) => {
                    let origin = Origin::new(module_path!(), e.stage());
                    self.ledger.record(&mut ctx.failures, entry, &e, &origin).await;
                    summary.failed += 1;
                }
            }
        }

        self.update_progress(
            InstallPhase::Complete,
            total,
            total,
            format!(
                "{} installed, {} skipped, {} failed",
                summary.installed, summary.skipped, summary.failed
            ),
        );
        Ok(summary)
    }

    /// Download, extract and merge one standard or custom entry
    ///
    /// The archive and scratch directory are removed afterwards whether or
    /// not the earlier steps succeeded.
    async fn install_entry(
        &self,
        entry: &mut ManifestEntry,
        step: usize,
        total: usize,
    ) -> Result<EntryOutcome, InstallError> {
        let scratch = self.config.extracted_root().join(entry.full_file_name(false));
        let outcome = self.download_and_merge(entry, &scratch, step, total).await;

        self.update_progress(InstallPhase::CleaningUp, step, total, entry.full_file_name(false));
        if !entry.file_extension().is_empty() {
            self.cleanup(&self.config.downloads_root().join(entry.full_file_name(true))).await;
        }
        self.cleanup(&scratch).await;

        outcome
    }

    async fn download_and_merge(
        &self,
        entry: &mut ManifestEntry,
        scratch: &Path,
        step: usize,
        total: usize,
    ) -> Result<EntryOutcome, InstallError> {
        self.update_progress(InstallPhase::Downloading, step, total, entry.full_file_name(false));
        let archive = match self.downloader.download(entry, &self.config.downloads_root()).await? {
            DownloadResult::Downloaded { path, .. } => path,
            DownloadResult::Skipped { reason } => {
                info!("Skipping {}: {}", entry.full_file_name(false), reason);
                return Ok(EntryOutcome::Skipped);
            }
        };

        self.update_progress(InstallPhase::Extracting, step, total, entry.full_file_name(true));
        self.extractor.extract(&archive, scratch).await?;

        self.update_progress(InstallPhase::Merging, step, total, entry.full_file_name(false));
        let destination = self.destination(entry);
        for rule in entry.inner_paths() {
            let rule_dir = rule.resolve(scratch);
            copy_root(&rule_dir, &destination).await?;

            if matches!(entry, ManifestEntry::Custom(_)) {
                copy_if_exists(&rule_dir, &destination).await?;
            } else {
                for subdirectory in &self.config.optional_subdirectories {
                    copy_if_exists(&rule_dir.join(subdirectory), &destination.join(subdirectory)).await?;
                }
            }
        }

        Ok(EntryOutcome::Installed)
    }

    /// Folder an entry's files are merged into
    pub fn destination(&self, entry: &ManifestEntry) -> PathBuf {
        match entry {
            ManifestEntry::Custom(custom) if custom.use_install_path => self
                .config
                .install_path
                .join(custom.output_path.trim_start_matches(['/', '\\'])),
            ManifestEntry::Custom(custom) => PathBuf::from(&custom.output_path),
            _ => self.config.mods_root().join(entry.full_file_name(false)),
        }
    }

    async fn cleanup(&self, path: &Path) {
        if let Err(e) = remove_path(path).await {
            warn!("Could not remove {}: {}", path.display(), e);
        }
    }

    fn update_progress(&self, phase: InstallPhase, current_step: usize, total_steps: usize, message: String) {
        if let Some(callback) = &self.progress_callback {
            callback(InstallProgress {
                phase,
                current_step,
                total_steps,
                message,
            });
        }
    }
}

async fn create_dir(path: &Path) -> Result<(), InstallError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| InstallError::CreateDir {
            path: path.to_path_buf(),
            source: e,
        })
}
