//! TuneBridge - Main entry point
//!
//! Migrates a video-platform playlist into a catalog playlist: fetches the
//! source items, interprets their titles, resolves catalog matches and fills
//! the destination playlist.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tunebridge_common::config::{load_config, ConfigFileResolver};
use tunebridge_match::clients::{SpotifyConnector, StaticTokenAuth, YouTubePlaylistFeed};
use tunebridge_match::config::RunSettings;
use tunebridge_match::playlist::PlaylistDecision;
use tunebridge_match::services::analyze_unmatched;
use tunebridge_match::tables;
use tunebridge_match::workflow::{self, MigrationPlan};
use tunebridge_match::{RunError, RunStage};

const DEFAULT_PLAYLIST_NAME: &str = "Imported Playlist";

/// Command-line arguments for tunebridge
#[derive(Parser, Debug)]
#[command(name = "tunebridge")]
#[command(about = "Migrate video playlists to catalog playlists")]
#[command(version)]
struct Args {
    /// Bootstrap TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, match, export and fill a playlist
    Migrate {
        /// Source playlist id
        #[arg(long)]
        source_playlist: String,

        /// Name for a newly created playlist
        #[arg(long, default_value = DEFAULT_PLAYLIST_NAME, conflicts_with = "existing_playlist")]
        playlist_name: String,

        /// Existing playlist id, URI or URL
        #[arg(long)]
        existing_playlist: Option<String>,

        /// Create the new playlist as private
        #[arg(long)]
        private: bool,

        /// Match and export only
        #[arg(long)]
        skip_playlist: bool,
    },

    /// Fill a playlist from a matched-tracks export
    Import {
        #[arg(long)]
        matched_csv: PathBuf,

        #[arg(long, default_value = DEFAULT_PLAYLIST_NAME, conflicts_with = "existing_playlist")]
        playlist_name: String,

        #[arg(long)]
        existing_playlist: Option<String>,

        #[arg(long)]
        private: bool,
    },

    /// Bucket the titles of an unmatched-tracks export
    Analyze {
        #[arg(long)]
        unmatched_csv: PathBuf,
    },
}

fn playlist_decision(name: String, existing: Option<String>, private: bool) -> PlaylistDecision {
    match existing {
        Some(reference) => PlaylistDecision::UseExisting(reference),
        None => PlaylistDecision::CreateNew {
            name,
            public: !private,
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config_path = ConfigFileResolver::new(args.config.clone()).resolve();
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    // RUST_LOG > --log-level > config
    let default_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = &config_path {
        info!("Config file candidate: {}", path.display());
    }

    let settings = RunSettings::from_config(&config);
    let started = Instant::now();

    let outcome = run(args.command, &settings).await;

    info!("Execution time: {:.2} seconds", started.elapsed().as_secs_f64());

    if let Err(e) = outcome {
        if let Some(RunError::BatchAbort { stage, reason }) = e.downcast_ref::<RunError>() {
            error!("Run failed at stage: {}", stage);
            error!("Reason: {}", reason);
        } else {
            error!("Run failed: {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Command, settings: &RunSettings) -> Result<()> {
    match command {
        Command::Migrate {
            source_playlist,
            playlist_name,
            existing_playlist,
            private,
            skip_playlist,
        } => {
            let feed = YouTubePlaylistFeed::new(settings.youtube_api_key.clone(), source_playlist)
                .map_err(|e| RunError::abort(RunStage::FetchSource, e))?;
            let auth = StaticTokenAuth::new(settings.spotify_access_token.clone());

            let plan = MigrationPlan {
                output_dir: settings.output_dir.clone(),
                resolver: settings.resolver.clone(),
                workers: settings.workers,
                playlist: (!skip_playlist)
                    .then(|| playlist_decision(playlist_name, existing_playlist, private)),
            };

            let cancel = CancellationToken::new();
            spawn_interrupt_watcher(cancel.clone());

            let summary =
                workflow::run_migration(&feed, &auth, &SpotifyConnector::default(), &plan, cancel)
                    .await?;

            println!("{}", summary.report.display_string());
            if let Some(playlist_id) = summary.playlist_id {
                info!(
                    "Added {} tracks to playlist {}",
                    summary.tracks_added, playlist_id
                );
            }
        }

        Command::Import {
            matched_csv,
            playlist_name,
            existing_playlist,
            private,
        } => {
            let auth = StaticTokenAuth::new(settings.spotify_access_token.clone());
            let decision = playlist_decision(playlist_name, existing_playlist, private);

            let imported = workflow::run_import(
                &matched_csv,
                &settings.resolver.format,
                &auth,
                &SpotifyConnector::default(),
                &decision,
            )
            .await?;

            if let Some((playlist_id, added)) = imported {
                info!("Added {} tracks to playlist {}", added, playlist_id);
            }
        }

        Command::Analyze { unmatched_csv } => {
            let titles = tables::read_unmatched_titles(&unmatched_csv).with_context(|| {
                format!("Failed to read unmatched export {}", unmatched_csv.display())
            })?;
            let patterns = analyze_unmatched(titles.iter().map(String::as_str));

            println!("Unmatched track patterns: {}", patterns.display_string());
            for (label, bucket) in patterns.buckets() {
                if bucket.is_empty() {
                    continue;
                }
                println!("\n{} ({}):", label, bucket.len());
                for title in bucket {
                    println!("  - {}", title);
                }
            }
        }
    }

    Ok(())
}

/// Stop the batch after in-flight items on Ctrl+C
fn spawn_interrupt_watcher(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Received Ctrl+C, finishing in-flight items");
                cancel.cancel();
            }
            Err(e) => warn!("Failed to install Ctrl+C handler: {}", e),
        }
    });
}
