//! Bulk upload of local videos to R2.
//!
//! `folio-upload 2.mp4 10.mp4` uploads the named files; with no arguments every
//! video in the folder is uploaded.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folio_storage::{discover_videos, upload_batch, R2Client, DEFAULT_VIDEO_EXTENSION};

#[derive(Debug, Parser)]
#[command(name = "folio-upload", about = "Upload portfolio videos to R2")]
struct Args {
    /// Folder containing the videos.
    #[arg(long, env = "FOLIO_VIDEOS_DIR", default_value = "public/videos")]
    videos_dir: PathBuf,

    /// Extension scanned for when no files are named.
    #[arg(long, env = "FOLIO_VIDEO_EXT", default_value = DEFAULT_VIDEO_EXTENSION)]
    video_ext: String,

    /// File names inside the folder to upload.
    files: Vec<String>,
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio=info,folio_storage=info,folio_upload=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false))
            .with(env_filter)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let client = R2Client::from_env()?;
    info!("Bucket: {}", client.bucket());

    let files = if args.files.is_empty() {
        discover_videos(&args.videos_dir, &args.video_ext).await?
    } else {
        args.files
    };

    if files.is_empty() {
        warn!("No videos found in {}", args.videos_dir.display());
        return Ok(());
    }

    let report = upload_batch(&client, &args.videos_dir, &files).await;
    info!(
        uploaded = report.uploaded(),
        skipped = report.skipped(),
        failed = report.failed(),
        "Upload finished"
    );

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
