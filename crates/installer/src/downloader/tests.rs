//! Unit tests for the downloader module against a local HTTP server

use super::*;
use crate::context::RunContext;
use crate::manifest::{ManifestEntry, ManifestParser};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Helper struct to capture progress events during testing
#[derive(Debug, Default)]
struct ProgressCapture {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl ProgressCapture {
    fn get_callback(&self) -> ProgressCallback {
        let events = self.events.clone();
        Arc::new(move |event| {
            events.lock().unwrap().push(event);
        })
    }

    fn count_events_of_type(&self, event_type: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| match event {
                ProgressEvent::DownloadStarted { .. } => event_type == "download_started",
                ProgressEvent::DownloadProgress { .. } => event_type == "download_progress",
                ProgressEvent::DownloadComplete { .. } => event_type == "download_complete",
                ProgressEvent::Warning { .. } => event_type == "warning",
            })
            .count()
    }
}

/// Authenticator that hands out numbered tokens and counts calls
struct CountingAuthenticator {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SessionAuthenticator for CountingAuthenticator {
    async fn acquire_token(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("session-token".to_string())
    }
}

fn standard_entry(link: &str) -> ManifestEntry {
    let mut ctx = RunContext::new();
    let line = format!("{}\t0\tCreator\tSome Mod\thttps://original.example/page\tnote", link);
    ManifestParser::new().decode_line(&mut ctx, &line).unwrap()
}

/// Downloader that routes the mock server's host to `kind`
fn downloader_for(kind: HostKind) -> ModDownloader {
    let config = DownloadConfig::default()
        .with_host_alias("127.0.0.1", kind)
        .with_user_agent("modpack-test");
    ModDownloader::new(config).unwrap()
}

#[tokio::test]
async fn test_direct_download_names_file_from_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/owner/repo/archive/main"))
        .and(header("user-agent", "modpack-test"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"7z-bytes".to_vec(), "application/x-7z-compressed"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let downloader = downloader_for(HostKind::GitHub);
    let mut entry = standard_entry(&format!("{}/owner/repo/archive/main", server.uri()));

    let result = downloader.download(&mut entry, dir.path()).await.unwrap();

    assert_eq!(entry.file_extension(), ".7z");
    let expected = dir.path().join("1- Some Mod Creator.7z");
    assert_eq!(result, DownloadResult::Downloaded { path: expected.clone(), size: 8 });
    assert_eq!(tokio::fs::read(&expected).await.unwrap(), b"7z-bytes");
}

#[tokio::test]
async fn test_unrecognized_content_type_uses_error_extension() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"<html/>".to_vec(), "text/html"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let downloader = downloader_for(HostKind::GitHub);
    let mut entry = standard_entry(&format!("{}/file", server.uri()));

    downloader.download(&mut entry, dir.path()).await.unwrap();

    assert_eq!(entry.file_extension(), ".ERROR");
    assert!(dir.path().join("1- Some Mod Creator.ERROR").is_file());
}

#[tokio::test]
async fn test_non_success_status_is_an_error_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let downloader = downloader_for(HostKind::GitHub);
    let mut entry = standard_entry(&format!("{}/missing", server.uri()));

    match downloader.download(&mut entry, dir.path()).await {
        Err(DownloadError::HttpStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("Expected HttpStatus error, got {:?}", other),
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_progress_events_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![7u8; 64 * 1024], "application/zip"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let capture = ProgressCapture::default();
    let downloader = downloader_for(HostKind::GitHub).with_progress_callback(capture.get_callback());
    let mut entry = standard_entry(&format!("{}/big", server.uri()));

    downloader.download(&mut entry, dir.path()).await.unwrap();

    assert_eq!(capture.count_events_of_type("download_started"), 1);
    assert_eq!(capture.count_events_of_type("download_complete"), 1);
    assert_eq!(capture.count_events_of_type("warning"), 0);
}

#[tokio::test]
async fn test_gofile_sends_session_cookie_and_authenticates_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("cookie", "accountToken=session-token"))
        .and(header("connection", "close"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"zip".to_vec(), "application/zip"))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let downloader = downloader_for(HostKind::GoFile)
        .with_authenticator(CountingAuthenticator { calls: calls.clone() });

    let mut first = standard_entry(&format!("{}/d/first", server.uri()));
    let mut second = standard_entry(&format!("{}/d/second", server.uri()));
    downloader.download(&mut first, dir.path()).await.unwrap();
    downloader.download(&mut second, dir.path()).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_gofile_does_not_follow_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/d/moved"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/elsewhere"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let downloader = downloader_for(HostKind::GoFile)
        .with_authenticator(CountingAuthenticator { calls });
    let mut entry = standard_entry(&format!("{}/d/moved", server.uri()));

    match downloader.download(&mut entry, dir.path()).await {
        Err(DownloadError::HttpStatus { status, .. }) => assert_eq!(status, 302),
        other => panic!("Expected HttpStatus error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_moddb_scrapes_landing_page_then_downloads() {
    let server = MockServer::start().await;
    let page = r#"<html><a id="downloadon" href="/downloads/start/42">Download</a></html>"#;
    Mock::given(method("GET"))
        .and(path("/mods/some-mod/downloads/file"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page.as_bytes().to_vec(), "text/html"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/downloads/start/42"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/mirror/file.rar"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mirror/file.rar"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"rar".to_vec(), "application/x-rar-compressed"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let downloader = downloader_for(HostKind::ModDb);
    let mut entry = standard_entry(&format!("{}/mods/some-mod/downloads/file", server.uri()));

    let result = downloader.download(&mut entry, dir.path()).await.unwrap();

    assert_eq!(entry.file_extension(), ".rar");
    assert_eq!(result.path(), Some(dir.path().join("1- Some Mod Creator.rar").as_path()));
}

#[tokio::test]
async fn test_moddb_landing_page_redirect_is_not_followed() {
    let server = MockServer::start().await;
    let page = r#"<html><a id="downloadon" href="/downloads/start/42">Download</a></html>"#;
    Mock::given(method("GET"))
        .and(path("/mods/moved"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/mods/new-home"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mods/new-home"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page.as_bytes().to_vec(), "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let downloader = downloader_for(HostKind::ModDb);
    let mut entry = standard_entry(&format!("{}/mods/moved", server.uri()));

    match downloader.download(&mut entry, dir.path()).await {
        Err(DownloadError::HttpStatus { status, .. }) => assert_eq!(status, 302),
        other => panic!("Expected HttpStatus error, got {:?}", other),
    }
    assert_eq!(entry.file_extension(), "");
}

#[tokio::test]
async fn test_moddb_without_link_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"<html>removed</html>".to_vec(), "text/html"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let capture = ProgressCapture::default();
    let downloader = downloader_for(HostKind::ModDb).with_progress_callback(capture.get_callback());
    let mut entry = standard_entry(&format!("{}/mods/gone", server.uri()));

    let result = downloader.download(&mut entry, dir.path()).await.unwrap();

    assert!(matches!(result, DownloadResult::Skipped { .. }));
    assert_eq!(entry.file_extension(), "");
    assert_eq!(capture.count_events_of_type("warning"), 1);
    assert_eq!(capture.count_events_of_type("download_started"), 0);
}

#[tokio::test]
async fn test_unknown_host_is_rejected() {
    let dir = tempdir().unwrap();
    let downloader = ModDownloader::new(DownloadConfig::default()).unwrap();
    let mut entry = standard_entry("https://example.com/files/mod.zip");

    match downloader.download(&mut entry, dir.path()).await {
        Err(DownloadError::UnknownHost { host, link }) => {
            assert_eq!(host, "https://example.com");
            assert_eq!(link, "https://example.com/files/mod.zip");
        }
        other => panic!("Expected UnknownHost error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_marker_has_nothing_to_download() {
    let dir = tempdir().unwrap();
    let downloader = ModDownloader::new(DownloadConfig::default()).unwrap();
    let mut ctx = RunContext::new();
    let mut marker = ManifestParser::new().decode_line(&mut ctx, "Visuals").unwrap();

    let result = downloader.download(&mut marker, dir.path()).await.unwrap();
    assert!(matches!(result, DownloadResult::Skipped { .. }));
}

#[test]
fn test_resolve_host_uses_aliases() {
    let config = DownloadConfig::default().with_host_alias("mirror.local", HostKind::GitHub);
    let downloader = ModDownloader::new(config).unwrap();
    assert_eq!(downloader.resolve_host("https://mirror.local"), HostKind::GitHub);
    assert_eq!(downloader.resolve_host("https://www.moddb.com"), HostKind::ModDb);
}
