//! Command-line front end for the modpack installer

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

use modpack_installer::context::RunContext;
use modpack_installer::downloader::{ConsoleProgressReporter, DownloadConfig, IntoProgressCallback, ModDownloader};
use modpack_installer::install::{Installer, InstallerConfig};
use modpack_installer::manifest::{load_custom_entries, parse_manifest_file, ManifestEntry, ManifestParser};

#[derive(Parser)]
#[command(name = "modpack", version, about = "Download, extract and merge a modpack manifest")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Install every entry of a manifest
    Install {
        #[arg(long)]
        manifest: PathBuf,
        #[arg(long)]
        install_path: PathBuf,
        /// JSON file with custom entries, installed after the manifest
        #[arg(long)]
        custom: Option<PathBuf>,
        /// Accept rows from a failed-entries file
        #[arg(long)]
        retry: bool,
        #[arg(long, default_value = "7z")]
        seven_zip: PathBuf,
        /// GoFile account token, overrides GOFILE_TOKEN
        #[arg(long)]
        gofile_token: Option<String>,
    },
    /// Print the decoded entries of a manifest
    List {
        #[arg(long)]
        manifest: PathBuf,
        #[arg(long)]
        retry: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match cli.cmd {
        Cmd::Install { manifest, install_path, custom, retry, seven_zip, gofile_token } => {
            install(&manifest, install_path, custom.as_deref(), retry, seven_zip, gofile_token, cli.verbose).await
        }
        Cmd::List { manifest, retry } => list(&manifest, retry).await,
    }
}

async fn decode(manifest: &Path, retry: bool) -> Result<RunContext> {
    let parser = ManifestParser::new().with_failed_rows(retry);
    let mut ctx = RunContext::new();
    parse_manifest_file(&parser, &mut ctx, manifest)
        .await
        .with_context(|| format!("reading manifest {}", manifest.display()))?;
    Ok(ctx)
}

async fn install(
    manifest: &Path,
    install_path: PathBuf,
    custom: Option<&Path>,
    retry: bool,
    seven_zip: PathBuf,
    gofile_token: Option<String>,
    verbose: bool,
) -> Result<()> {
    let mut ctx = decode(manifest, retry).await?;

    if let Some(custom) = custom {
        let entries = load_custom_entries(custom)
            .await
            .with_context(|| format!("reading custom entries {}", custom.display()))?;
        info!("Loaded {} custom entries", entries.len());
        for entry in entries {
            ctx.push_entry(ManifestEntry::Custom(entry));
        }
    }

    let mut download_config = DownloadConfig::from_env();
    if let Some(token) = gofile_token {
        download_config = download_config.with_gofile_token(token);
    }
    let downloader = ModDownloader::new(download_config)
        .context("setting up the downloader")?
        .with_progress_callback(ConsoleProgressReporter::new(verbose).into_callback());

    let config = InstallerConfig::new(install_path).with_seven_zip(seven_zip);
    let installer = Installer::new(config, downloader);
    let summary = installer.run(&mut ctx).await.context("installation aborted")?;

    println!(
        "✅ {} installed, {} skipped, {} failed, {} separators",
        summary.installed, summary.skipped, summary.failed, summary.markers
    );
    if ctx.has_failures() {
        warn!(
            "{} entries failed, see {} and {}",
            ctx.failures.len(),
            installer.ledger().log_path.display(),
            installer.ledger().failed_entries_path.display()
        );
    }
    Ok(())
}

async fn list(manifest: &Path, retry: bool) -> Result<()> {
    let ctx = decode(manifest, retry).await?;
    for entry in &ctx.entries {
        match entry.link() {
            Some(link) => println!("{:<10} {}  <- {}", entry.kind(), entry.full_file_name(false), link),
            None => println!("{:<10} {}", entry.kind(), entry.full_file_name(false)),
        }
    }
    Ok(())
}
