//! Installation module
//!
//! This module turns decoded manifest entries into merged mod folders:
//! download, extract, merge, clean up, and record whatever failed.

pub mod error;
pub mod executor;
pub mod extract;
pub mod ledger;
pub mod merge;

// Re-export commonly used types
pub use error::InstallError;
pub use executor::{
    InstallPhase, InstallProgress, InstallProgressCallback, Installer, InstallerConfig, RunSummary,
};
pub use extract::{ArchiveExtractor, SevenZipExtractor};
pub use ledger::{FailureLedger, Origin};
pub use merge::{copy_if_exists, copy_root, OPTIONAL_SUBDIRECTORIES};
