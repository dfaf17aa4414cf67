//! Tab-separated manifest decoder
//!
//! Each line is one entry. The number of tab-separated fields decides the
//! kind: a single field is a separator marker, otherwise the fields are
//!
//! ```text
//! link <TAB> inner paths <TAB> creator <TAB> out name <TAB> original link <TAB> note
//! ```
//!
//! The trailing note may be left out. Failed-entry rows written by the
//! ledger carry two extra leading columns (display name and `----`) and can
//! be decoded directly when [`ManifestParser::with_failed_rows`] is set.

use std::path::Path;
use tracing::debug;

use crate::context::RunContext;
use crate::manifest::entry::{ManifestEntry, MarkerEntry, StandardEntry};
use crate::manifest::error::{ManifestError, Result};
use crate::manifest::host_path::HostPath;
use crate::manifest::path_rule::PathRule;

/// Column separator in the manifest
pub const FIELD_DELIMITER: char = '\t';

/// Token the ledger writes between the display name and the original row
pub const FAILED_ROW_TOKEN: &str = "----";

const STANDARD_FIELDS: usize = 6;
const FAILED_ROW_FIELDS: usize = STANDARD_FIELDS + 2;

/// Decoder for manifest lines
#[derive(Debug, Clone, Default)]
pub struct ManifestParser {
    /// Accept rows copied from the failed-entries file
    pub accept_failed_rows: bool,
}

impl ManifestParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failed_rows(mut self, accept: bool) -> Self {
        self.accept_failed_rows = accept;
        self
    }

    /// Decode every non-blank line, appending the entries to `ctx`
    ///
    /// Returns the entries decoded by this call. The first error stops
    /// decoding; entries decoded before it stay in the context.
    pub fn decode_all<'c, I, S>(&self, ctx: &'c mut RunContext, lines: I) -> Result<&'c [ManifestEntry]>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = ctx.entries.len();

        for (number, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line = if number == 0 { line.trim_start_matches('\u{feff}') } else { line };
            if line.trim().is_empty() {
                continue;
            }

            let entry = self.decode_numbered_line(ctx, line, number + 1)?;
            ctx.push_entry(entry);
        }

        debug!("Decoded {} manifest entries", ctx.entries.len() - start);
        Ok(&ctx.entries[start..])
    }

    /// Decode a single line into an entry
    pub fn decode_line(&self, ctx: &mut RunContext, line: &str) -> Result<ManifestEntry> {
        self.decode_numbered_line(ctx, line, 1)
    }

    fn decode_numbered_line(&self, ctx: &mut RunContext, line: &str, line_number: usize) -> Result<ManifestEntry> {
        let mut fields: Vec<String> = line.split(FIELD_DELIMITER).map(reduce).collect();

        if fields.len() == 1 {
            let name = fields.remove(0);
            return Ok(ManifestEntry::Marker(MarkerEntry {
                index: ctx.next_index(),
                name,
            }));
        }

        if self.accept_failed_rows && fields.len() == FAILED_ROW_FIELDS && fields[1] == FAILED_ROW_TOKEN {
            debug!("Decoding failed-entry row for '{}'", fields[0]);
            fields.drain(..2);
        }

        match fields.len() {
            5 => fields.push(String::new()),
            STANDARD_FIELDS => {}
            found => {
                return Err(ManifestError::FieldCount {
                    line_number,
                    found,
                    line: line.to_string(),
                });
            }
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        let link = next();
        let inner_paths = PathRule::parse_list(&next());
        let creator_name = next();
        let out_name = next();
        let original_link = next();
        let note = next();

        Ok(ManifestEntry::Standard(StandardEntry {
            index: ctx.next_index(),
            link: HostPath::parse(&link),
            inner_paths,
            creator_name,
            out_name,
            original_link,
            note,
            file_extension: String::new(),
        }))
    }
}

/// Trim a field and collapse interior whitespace runs to one space
pub fn reduce(field: &str) -> String {
    field.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Read and decode a manifest file into `ctx`
pub async fn parse_manifest_file<'c>(
    parser: &ManifestParser,
    ctx: &'c mut RunContext,
    path: &Path,
) -> Result<&'c [ManifestEntry]> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    parser.decode_all(ctx, text.lines())
}
