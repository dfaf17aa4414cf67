//! Modpack Installer Library
//!
//! This library installs a modpack described by a tab-separated manifest:
//! each listed mod is downloaded from its hosting service, extracted, and
//! the selected folders are merged into a numbered mod folder.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use modpack_installer::context::RunContext;
//! use modpack_installer::downloader::{DownloadConfig, ModDownloader};
//! use modpack_installer::install::{Installer, InstallerConfig};
//! use modpack_installer::manifest::ManifestParser;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ctx = RunContext::new();
//! ManifestParser::new().decode_all(&mut ctx, [
//!     "Visuals",
//!     "https://github.com/owner/hd-models/archive/main.zip\tmain\tOwner\tHD Models\thttps://www.moddb.com/mods/hd\t",
//! ])?;
//!
//! let downloader = ModDownloader::new(DownloadConfig::from_env())?;
//! let installer = Installer::new(InstallerConfig::new("./Anomaly"), downloader);
//! let summary = installer.run(&mut ctx).await?;
//!
//! for failed in &ctx.failures {
//!     println!("failed: {}", failed.full_file_name(true));
//! }
//! println!("{:?}", summary);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Manifest decoding**: separators, mod rows, retry rows from the failed-entries file
//! - **Host strategies**: GitHub redirects, GoFile session cookies, ModDB landing pages
//! - **Streaming downloads**: archive type taken from the response content type
//! - **Selective merge**: per-entry inner paths plus well-known optional subfolders
//! - **Failure ledger**: failures are logged and collected, the run keeps going

pub mod context;
pub mod downloader;
pub mod install;
pub mod manifest;

// Re-export commonly used types for convenience
pub use context::RunContext;
pub use downloader::{DownloadConfig, DownloadError, DownloadResult, ModDownloader, ProgressEvent};
pub use install::{InstallError, Installer, InstallerConfig, RunSummary};
pub use manifest::{ManifestEntry, ManifestError, ManifestParser};
