//! Reconcile the video manifest with the media folder.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folio_reconcile::{run, ReconcileOptions};

#[derive(Debug, Parser)]
#[command(name = "folio-reconcile", about = "Compare the video manifest with the media folder")]
struct Args {
    /// Folder holding video files and thumbnails.
    #[arg(long, env = "FOLIO_VIDEOS_DIR", default_value = "./public/videos")]
    videos_dir: PathBuf,

    /// Authoritative manifest (read only).
    #[arg(long, env = "FOLIO_MANIFEST", default_value = "./src/data/videos.json")]
    manifest: PathBuf,

    /// Where the text report is written.
    #[arg(long, env = "FOLIO_REPORT", default_value = "./update-report.txt")]
    report: PathBuf,

    /// Where the merged candidate manifest is written.
    #[arg(long, env = "FOLIO_MERGED", default_value = "./videos-merged.json")]
    merged: PathBuf,

    /// Video extension to look for (repeatable).
    #[arg(long = "video-ext", env = "FOLIO_VIDEO_EXT", value_delimiter = ',', default_value = "mp4")]
    video_ext: Vec<String>,

    /// Program stamped on drafted entries.
    #[arg(long, env = "FOLIO_DEFAULT_PROGRAM", default_value = "Adobe Premiere Pro")]
    default_program: String,
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio=info,folio_reconcile=info"));

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
    let options = ReconcileOptions {
        videos_dir: args.videos_dir,
        manifest: args.manifest,
        report: args.report,
        merged: args.merged,
        video_extensions: args.video_ext,
        default_program: args.default_program,
        ..ReconcileOptions::default()
    };

    let outcome = run(&options).await?;
    info!(
        new = outcome.diff.new_videos.len(),
        missing_videos = outcome.diff.missing_videos.len(),
        missing_thumbnails = outcome.diff.missing_thumbnails.len(),
        "Reconciliation finished"
    );

    if !outcome.is_success() {
        for e in &outcome.write_errors {
            error!("{}", e);
        }
        std::process::exit(1);
    }

    info!("Review the merged manifest and copy it over manually if desired");
    Ok(())
}
