//! ModDB landing page scraping

use once_cell::sync::Lazy;
use regex::Regex;

/// The mirror button on a download page: the first `href` after `id="downloadon"`
static DOWNLOAD_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)id="downloadon".*?href="([^"]+)""#).expect("download link pattern is valid")
});

/// Extract the download link from a landing page, if there is one
///
/// HTML-escaped ampersands in the link are decoded.
pub fn parse_download_link(html: &str) -> Option<String> {
    DOWNLOAD_LINK
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|href| href.as_str().replace("&amp;", "&"))
        .filter(|href| !href.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_link_after_marker() {
        let html = r#"
            <a href="/mods/other">Other</a>
            <a class="buttondownload" id="downloadon"
               href="/downloads/start/123456?referer=x&amp;y=1" title="Download">
        "#;
        assert_eq!(
            parse_download_link(html).as_deref(),
            Some("/downloads/start/123456?referer=x&y=1")
        );
    }

    #[test]
    fn test_attribute_order() {
        let html = r#"<p id="downloadon"><a href="https://mirror.example.com/a.zip">go</a></p>"#;
        assert_eq!(parse_download_link(html).as_deref(), Some("https://mirror.example.com/a.zip"));
    }

    #[test]
    fn test_no_link() {
        assert_eq!(parse_download_link("<html><body>Removed</body></html>"), None);
        assert_eq!(parse_download_link(r#"<a href="/x">x</a> id="downloadon""#), None);
    }
}
