//! Custom entries file
//!
//! Custom entries are not part of the tab-separated manifest. They come
//! from a small JSON list so packages that live outside the mods tree (base
//! game overrides, tool binaries) can be installed in the same run:
//!
//! ```json
//! [
//!   {
//!     "link": "https://github.com/owner/definitive-files/archive/main.zip",
//!     "inner_paths": "definitive-files-main",
//!     "output_path": "overwrite",
//!     "out_name": "Definitive Files",
//!     "use_install_path": true
//!   }
//! ]
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::manifest::entry::CustomEntry;
use crate::manifest::error::{ManifestError, Result};

/// Raw custom entry as it appears in the JSON file
#[derive(Debug, Clone, Deserialize)]
pub struct CustomEntrySpec {
    pub link: String,
    #[serde(default)]
    pub inner_paths: String,
    pub output_path: String,
    pub out_name: String,
    #[serde(default = "default_use_install_path")]
    pub use_install_path: bool,
}

fn default_use_install_path() -> bool {
    true
}

impl From<CustomEntrySpec> for CustomEntry {
    fn from(spec: CustomEntrySpec) -> Self {
        CustomEntry::new(&spec.link, &spec.inner_paths, spec.output_path, spec.out_name)
            .with_install_path(spec.use_install_path)
    }
}

/// Parse custom entries from JSON text
pub fn parse_custom_entries(json: &str, origin: &Path) -> Result<Vec<CustomEntry>> {
    let specs: Vec<CustomEntrySpec> = serde_json::from_str(json).map_err(|e| ManifestError::CustomEntries {
        path: origin.to_path_buf(),
        source: e,
    })?;

    Ok(specs.into_iter().map(CustomEntry::from).collect())
}

/// Read custom entries from a JSON file
pub async fn load_custom_entries(path: &Path) -> Result<Vec<CustomEntry>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    parse_custom_entries(&json, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_custom_entries() {
        let json = r#"[
            {
                "link": "https://github.com/owner/files/archive/main.zip",
                "inner_paths": "files-main:files-main/extra",
                "output_path": "overwrite",
                "out_name": "Definitive Files"
            },
            {
                "link": "https://gofile.io/d/abc",
                "output_path": "/opt/tools",
                "out_name": "Tools",
                "use_install_path": false
            }
        ]"#;

        let entries = parse_custom_entries(json, Path::new("custom.json")).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].link.host, "https://github.com");
        assert_eq!(entries[0].inner_paths.len(), 3);
        assert!(entries[0].use_install_path);

        assert!(!entries[1].use_install_path);
        assert_eq!(entries[1].inner_paths.len(), 1);
        assert!(entries[1].inner_paths[0].is_root());
    }

    #[test]
    fn test_invalid_custom_entries() {
        let err = parse_custom_entries(r#"[{"link": 3}]"#, Path::new("custom.json")).unwrap_err();
        assert!(matches!(err, ManifestError::CustomEntries { .. }));
    }
}
