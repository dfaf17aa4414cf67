//! Download source implementations
//!
//! A manifest link is routed to one hosting strategy by looking at its host.
//! Each strategy lives in its own file.

pub mod github;
pub mod gofile;
pub mod moddb;
pub mod unknown;

pub use github::GitHubSource;
pub use gofile::GoFileSource;
pub use moddb::ModDbSource;
pub use unknown::UnknownSource;

use crate::manifest::HostPath;

/// Hosting service a link belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    /// Mod gallery; the link is a landing page holding the real download link
    ModDb,
    /// Code host; direct archive links behind redirects
    GitHub,
    /// File locker; needs a session cookie
    GoFile,
    Unknown,
}

/// Built-in host fragments, matched in this order
const BUILTIN_HOSTS: [(&str, HostKind); 3] = [
    ("moddb", HostKind::ModDb),
    ("github", HostKind::GitHub),
    ("gofile", HostKind::GoFile),
];

impl HostKind {
    /// Classify a host by case-sensitive substring match
    pub fn resolve(host: &str) -> Self {
        Self::resolve_with_aliases(host, &[])
    }

    /// Like [`HostKind::resolve`], falling back to `aliases` when no built-in fragment matches
    pub fn resolve_with_aliases(host: &str, aliases: &[(String, HostKind)]) -> Self {
        BUILTIN_HOSTS
            .iter()
            .map(|(fragment, kind)| (*fragment, *kind))
            .chain(aliases.iter().map(|(fragment, kind)| (fragment.as_str(), *kind)))
            .find(|(fragment, _)| host.contains(fragment))
            .map(|(_, kind)| kind)
            .unwrap_or(HostKind::Unknown)
    }

    pub fn description(&self) -> &'static str {
        match self {
            HostKind::ModDb => "ModDB landing page",
            HostKind::GitHub => "GitHub download",
            HostKind::GoFile => "GoFile locker",
            HostKind::Unknown => "unknown host",
        }
    }
}

/// Strategy chosen for one link
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadSource {
    ModDb(ModDbSource),
    GitHub(GitHubSource),
    GoFile(GoFileSource),
    Unknown(UnknownSource),
}

impl DownloadSource {
    pub fn for_link(kind: HostKind, link: &HostPath) -> Self {
        match kind {
            HostKind::ModDb => DownloadSource::ModDb(ModDbSource::new(&link.host, link.url())),
            HostKind::GitHub => DownloadSource::GitHub(GitHubSource::new(link.url())),
            HostKind::GoFile => DownloadSource::GoFile(GoFileSource::new(link.url())),
            HostKind::Unknown => DownloadSource::Unknown(UnknownSource::new(&link.host, link.url())),
        }
    }

    pub fn description(&self) -> String {
        match self {
            DownloadSource::ModDb(moddb) => format!("ModDB page {}", moddb.page_url),
            DownloadSource::GitHub(github) => format!("GitHub download from {}", github.url),
            DownloadSource::GoFile(gofile) => format!("GoFile download from {}", gofile.url),
            DownloadSource::Unknown(unknown) => format!("Unsupported host {}", unknown.host),
        }
    }
}
