//! Inner-archive path rules
//!
//! A manifest entry names one or more locations inside its extracted
//! archive, separated by `:`. Each one is normalized into a [`PathRule`]
//! that always starts and ends with `/`. The tokens `0`, `/` and `\`
//! mean "archive root" and become `/`. When none of the parts denote the
//! root, a root rule is put in front so the archive root is always merged.

use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical separator used inside normalized rules
pub const SEPARATOR: char = '/';

/// Separator between rules in the manifest's inner-path column
pub const RULE_DELIMITER: char = ':';

/// A normalized inner-archive path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathRule(String);

impl PathRule {
    /// The archive root
    pub fn root() -> Self {
        Self(SEPARATOR.to_string())
    }

    /// Normalize a single raw part, returns `None` for empty parts
    pub fn normalize(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if is_root_token(raw) {
            return Some(Self::root());
        }

        let mut rule = raw.replace('\\', "/");
        if !rule.starts_with(SEPARATOR) {
            rule.insert(0, SEPARATOR);
        }
        if !rule.ends_with(SEPARATOR) {
            rule.push(SEPARATOR);
        }
        Some(Self(rule))
    }

    /// Split and normalize the inner-path column of a manifest line
    pub fn parse_list(raw: &str) -> Vec<Self> {
        let mut has_root = false;
        let mut rules: Vec<Self> = raw
            .split(RULE_DELIMITER)
            .filter_map(Self::normalize)
            .inspect(|rule| has_root |= rule.is_root())
            .collect();

        if !has_root {
            rules.insert(0, Self::root());
        }
        rules
    }

    /// Join rules back into the manifest column format
    pub fn join_list(rules: &[Self]) -> String {
        rules
            .iter()
            .map(PathRule::as_str)
            .collect::<Vec<_>>()
            .join(&RULE_DELIMITER.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1 && self.0.starts_with(SEPARATOR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The directory this rule points at below `base`
    pub fn resolve(&self, base: &Path) -> PathBuf {
        self.0
            .split(SEPARATOR)
            .filter(|part| !part.is_empty())
            .fold(base.to_path_buf(), |path, part| path.join(part))
    }
}

impl fmt::Display for PathRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_root_token(raw: &str) -> bool {
    matches!(raw, "0" | "/" | "\\")
}
