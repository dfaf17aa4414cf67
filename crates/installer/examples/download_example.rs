//! Example demonstrating how to download a single manifest entry
//!
//! Decodes one manifest row, downloads its archive into a temporary
//! directory and prints where it landed. Nothing is extracted.
//!
//! Run this example with:
//! ```
//! cargo run --example download_example -- "<manifest row>"
//! ```

use modpack_installer::context::RunContext;
use modpack_installer::downloader::{
    ConsoleProgressReporter, DownloadConfig, DownloadResult, IntoProgressCallback, ModDownloader,
};
use modpack_installer::manifest::ManifestParser;
use tempfile::tempdir;

const DEFAULT_ROW: &str =
    "https://github.com/themrdemonized/xray-monolith/archive/refs/heads/all-in-one-vs2022-wpo.zip\t0\tdemonized\tModded Exes\thttps://github.com/themrdemonized/xray-monolith\t";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let row = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ROW.to_string());

    let mut ctx = RunContext::new();
    let mut entry = ManifestParser::new().decode_line(&mut ctx, &row)?;
    println!("📦 {} ({})", entry.full_file_name(false), entry.kind());

    let temp_dir = tempdir()?;
    let downloader = ModDownloader::new(DownloadConfig::from_env())?
        .with_progress_callback(ConsoleProgressReporter::new(true).into_callback());

    match downloader.download(&mut entry, temp_dir.path()).await? {
        DownloadResult::Downloaded { path, size } => {
            println!("✅ Saved {} ({} bytes)", path.display(), size);
        }
        DownloadResult::Skipped { reason } => {
            println!("⏭️  Skipped: {}", reason);
        }
    }
    Ok(())
}
