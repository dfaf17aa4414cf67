//! Manifest decoding and the entry model
//!
//! The manifest is a tab-separated text file listing mods in install
//! order. Decoding turns each line into a [`ManifestEntry`] numbered from
//! the run's [`RunContext`](crate::context::RunContext).

pub mod custom;
pub mod entry;
pub mod error;
pub mod host_path;
pub mod parser;
pub mod path_rule;

// Re-export main types
pub use custom::{load_custom_entries, parse_custom_entries, CustomEntrySpec};
pub use entry::{CustomEntry, ManifestEntry, MarkerEntry, StandardEntry};
pub use error::ManifestError;
pub use host_path::HostPath;
pub use parser::{parse_manifest_file, reduce, ManifestParser, FAILED_ROW_TOKEN};
pub use path_rule::PathRule;
