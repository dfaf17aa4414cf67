//! Per-run state shared by the manifest decoder and the installer

use crate::manifest::ManifestEntry;

/// First index handed out in a run
pub const FIRST_INDEX: u32 = 1;

/// Install-order counter plus the entries and failures of one run
///
/// Separate runs in one process use separate contexts.
#[derive(Debug)]
pub struct RunContext {
    next_index: u32,
    /// Decoded entries, in install order
    pub entries: Vec<ManifestEntry>,
    /// Entries that failed during this run, one record per failed entry
    pub failures: Vec<ManifestEntry>,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            next_index: FIRST_INDEX,
            entries: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Hand out the next install-order index
    pub fn next_index(&mut self) -> u32 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    pub fn push_entry(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
