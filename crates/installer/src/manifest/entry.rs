//! Manifest entry model
//!
//! An entry is one of three kinds. Markers only produce an empty,
//! numbered folder that groups the mods after it. Standard entries are
//! downloaded, extracted and merged into their own numbered folder under
//! the mods root. Custom entries are built by the caller rather than the
//! manifest and are merged into an explicit output path.

use crate::manifest::host_path::HostPath;
use crate::manifest::path_rule::PathRule;

/// Organizational grouping, no download
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEntry {
    pub index: u32,
    pub name: String,
}

/// A mod listed in the manifest
#[derive(Debug, Clone, PartialEq)]
pub struct StandardEntry {
    pub index: u32,
    pub link: HostPath,
    pub inner_paths: Vec<PathRule>,
    pub creator_name: String,
    pub out_name: String,
    /// Kept for the failed-entries file, nothing else reads it
    pub original_link: String,
    pub note: String,
    /// Set once the download reports its content type
    pub file_extension: String,
}

/// A caller-defined package merged into an explicit output path
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEntry {
    pub link: HostPath,
    pub inner_paths: Vec<PathRule>,
    pub output_path: String,
    pub out_name: String,
    /// Prefix `output_path` with the install path
    pub use_install_path: bool,
    pub file_extension: String,
}

impl CustomEntry {
    /// Create a custom entry; `inner_paths` uses the manifest's `:` syntax
    pub fn new<L, O, N>(link: L, inner_paths: &str, output_path: O, out_name: N) -> Self
    where
        L: AsRef<str>,
        O: Into<String>,
        N: Into<String>,
    {
        Self {
            link: HostPath::parse(link.as_ref()),
            inner_paths: PathRule::parse_list(inner_paths),
            output_path: output_path.into(),
            out_name: out_name.into(),
            use_install_path: true,
            file_extension: String::new(),
        }
    }

    pub fn with_install_path(mut self, use_install_path: bool) -> Self {
        self.use_install_path = use_install_path;
        self
    }
}

/// One decoded manifest row
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestEntry {
    Marker(MarkerEntry),
    Standard(StandardEntry),
    Custom(CustomEntry),
}

impl ManifestEntry {
    /// Name used for the entry's folders and its downloaded archive
    ///
    /// | kind     | without extension                  | with extension      |
    /// |----------|------------------------------------|---------------------|
    /// | Marker   | `{index}- {name}_separator`        | same                |
    /// | Standard | `{index}- {out_name} {creator}`    | `+ file_extension`  |
    /// | Custom   | `{out_name}`                       | `+ file_extension`  |
    ///
    /// Path separators in the names become `-`, so the result is always a
    /// single path component.
    pub fn full_file_name(&self, with_extension: bool) -> String {
        let name = match self {
            ManifestEntry::Marker(marker) => format!("{}- {}_separator", marker.index, marker.name),
            ManifestEntry::Standard(standard) => {
                let name = format!("{}- {} {}", standard.index, standard.out_name, standard.creator_name);
                if with_extension {
                    name + &standard.file_extension
                } else {
                    name
                }
            }
            ManifestEntry::Custom(custom) => {
                if with_extension {
                    format!("{}{}", custom.out_name, custom.file_extension)
                } else {
                    custom.out_name.clone()
                }
            }
        };
        name.replace(['/', '\\'], "-")
    }

    /// Install order number, custom entries are not numbered
    pub fn index(&self) -> Option<u32> {
        match self {
            ManifestEntry::Marker(marker) => Some(marker.index),
            ManifestEntry::Standard(standard) => Some(standard.index),
            ManifestEntry::Custom(_) => None,
        }
    }

    pub fn link(&self) -> Option<&HostPath> {
        match self {
            ManifestEntry::Marker(_) => None,
            ManifestEntry::Standard(standard) => Some(&standard.link),
            ManifestEntry::Custom(custom) => Some(&custom.link),
        }
    }

    pub fn inner_paths(&self) -> &[PathRule] {
        match self {
            ManifestEntry::Marker(_) => &[],
            ManifestEntry::Standard(standard) => &standard.inner_paths,
            ManifestEntry::Custom(custom) => &custom.inner_paths,
        }
    }

    pub fn file_extension(&self) -> &str {
        match self {
            ManifestEntry::Marker(_) => "",
            ManifestEntry::Standard(standard) => &standard.file_extension,
            ManifestEntry::Custom(custom) => &custom.file_extension,
        }
    }

    /// Record the extension discovered at download time; ignored for markers
    pub fn set_file_extension<S: Into<String>>(&mut self, extension: S) {
        match self {
            ManifestEntry::Marker(_) => {}
            ManifestEntry::Standard(standard) => standard.file_extension = extension.into(),
            ManifestEntry::Custom(custom) => custom.file_extension = extension.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ManifestEntry::Marker(_) => "marker",
            ManifestEntry::Standard(_) => "standard",
            ManifestEntry::Custom(_) => "custom",
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, ManifestEntry::Marker(_))
    }
}
