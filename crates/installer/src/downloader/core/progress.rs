//! Progress tracking and reporting for download operations
//!
//! Progress is informational only; nothing in the install flow depends on
//! which events were delivered.

use std::sync::Arc;

/// Progress callback for download operations
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Events emitted during download operations
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    DownloadStarted {
        url: String,
        file: String,
        total_size: Option<u64>,
    },
    DownloadProgress {
        url: String,
        downloaded: u64,
        total: Option<u64>,
        speed_bps: f64,
    },
    DownloadComplete {
        url: String,
        final_size: u64,
    },
    Warning {
        url: String,
        message: String,
    },
}

/// Trait for progress reporting with more granular control
pub trait ProgressReporter: Send + Sync {
    fn on_download_started(&self, _url: &str, _file: &str, _total_size: Option<u64>) {}
    fn on_download_progress(&self, _url: &str, _downloaded: u64, _total: Option<u64>, _speed_bps: f64) {}
    fn on_download_complete(&self, _url: &str, _final_size: u64) {}
    fn on_warning(&self, _url: &str, _message: &str) {}
}

/// Extension trait to convert ProgressReporter to ProgressCallback
pub trait IntoProgressCallback {
    fn into_callback(self) -> ProgressCallback;
}

impl<T: ProgressReporter + 'static> IntoProgressCallback for T {
    fn into_callback(self) -> ProgressCallback {
        Arc::new(move |event| match event {
            ProgressEvent::DownloadStarted { url, file, total_size } => {
                self.on_download_started(&url, &file, total_size);
            }
            ProgressEvent::DownloadProgress { url, downloaded, total, speed_bps } => {
                self.on_download_progress(&url, downloaded, total, speed_bps);
            }
            ProgressEvent::DownloadComplete { url, final_size } => {
                self.on_download_complete(&url, final_size);
            }
            ProgressEvent::Warning { url, message } => {
                self.on_warning(&url, &message);
            }
        })
    }
}

/// Simple console progress reporter implementation
#[derive(Debug, Default)]
pub struct ConsoleProgressReporter {
    pub verbose: bool,
}

impl ConsoleProgressReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for ConsoleProgressReporter {
    fn on_download_started(&self, url: &str, file: &str, total_size: Option<u64>) {
        match total_size {
            Some(size) => println!("📥 Downloading {} -> {} ({} bytes)", url, file, size),
            None => println!("📥 Downloading {} -> {}", url, file),
        }
    }

    fn on_download_progress(&self, _url: &str, downloaded: u64, total: Option<u64>, speed_bps: f64) {
        if !self.verbose {
            return;
        }
        let speed_mb = speed_bps / 1_000_000.0;
        match total {
            Some(total) if total > 0 => {
                let percent = downloaded * 100 / total;
                println!("⏬ {} / {} bytes => {}% complete ({:.1} MB/s)", downloaded, total, percent, speed_mb);
            }
            _ => println!("⏬ {} bytes downloaded ({:.1} MB/s)", downloaded, speed_mb),
        }
    }

    fn on_download_complete(&self, _url: &str, final_size: u64) {
        println!("✅ Download complete ({} bytes)", final_size);
    }

    fn on_warning(&self, url: &str, message: &str) {
        eprintln!("⚠️  {}: {}", url, message);
    }
}
