//! Host/path split of a raw manifest link
//!
//! Links are split after their third `/`: everything before it is the
//! scheme and authority the HTTP client connects to, everything from that
//! slash onward is the request path.

use std::fmt;

/// A link split into the part a client connects to and the part it requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPath {
    /// Scheme and authority, e.g. `https://github.com`
    pub host: String,
    /// Request path starting with `/`, e.g. `/owner/repo/archive/main.zip`
    pub path: String,
}

impl HostPath {
    pub fn new<H: Into<String>, P: Into<String>>(host: H, path: P) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Split a raw link at its third `/`
    ///
    /// Links with fewer than three slashes are not split; both parts are
    /// left empty.
    pub fn parse(link: &str) -> Self {
        match link.match_indices('/').nth(2) {
            Some((third_slash, _)) => Self {
                host: link[..third_slash].to_string(),
                path: link[third_slash..].to_string(),
            },
            None => Self::default(),
        }
    }

    /// Whether the split found no host at all
    pub fn is_empty(&self) -> bool {
        self.host.is_empty() && self.path.is_empty()
    }

    /// The full link again, host followed by path
    pub fn url(&self) -> String {
        format!("{}{}", self.host, self.path)
    }
}

impl fmt::Display for HostPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.host, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_after_third_slash() {
        let link = HostPath::parse("https://github.com/owner/repo/archive/main.zip");
        assert_eq!(link.host, "https://github.com");
        assert_eq!(link.path, "/owner/repo/archive/main.zip");
        assert_eq!(link.url(), "https://github.com/owner/repo/archive/main.zip");
    }

    #[test]
    fn test_too_few_slashes_leaves_both_empty() {
        let link = HostPath::parse("https://github.com");
        assert!(link.is_empty());
        assert_eq!(link.host, "");
        assert_eq!(link.path, "");

        assert!(HostPath::parse("not a link").is_empty());
        assert!(HostPath::parse("").is_empty());
    }

    #[test]
    fn test_trailing_third_slash_keeps_root_path() {
        let link = HostPath::parse("https://www.moddb.com/");
        assert_eq!(link.host, "https://www.moddb.com");
        assert_eq!(link.path, "/");
    }
}
