//! Run orchestration
//!
//! **Migrate:** fetch source → export source → authenticate → match →
//! export results → playlist → insert tracks.
//!
//! **Import:** read matched export → authenticate → playlist → insert tracks.
//!
//! Per-item search failures stay inside the report. Feed, auth, export and
//! playlist failures abort the run with the stage that failed. An interrupted
//! match stage still exports what it resolved, then aborts.

use crate::boundaries::{AuthProvider, CatalogSession, PlaylistSink, SearchBoundary, SourceFeed};
use crate::error::{RunError, RunResult, RunStage};
use crate::models::{CatalogFormat, MatchReport};
use crate::playlist::{self, PlaylistDecision};
use crate::services::{MatchPipeline, ResolverSettings};
use crate::tables;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Catalog-side boundaries built from one session
pub struct CatalogClients {
    pub search: Arc<dyn SearchBoundary>,
    pub sink: Arc<dyn PlaylistSink>,
}

/// Builds catalog clients once a session is available
pub trait CatalogConnector: Send + Sync {
    fn connect(&self, session: CatalogSession) -> Result<CatalogClients, String>;
}

/// Migration run parameters
#[derive(Debug, Clone)]
pub struct MigrationPlan {
    pub output_dir: PathBuf,
    pub resolver: ResolverSettings,
    pub workers: usize,
    /// `None` skips playlist operations (match + export only)
    pub playlist: Option<PlaylistDecision>,
}

/// What a finished run produced
#[derive(Debug)]
pub struct MigrationSummary {
    pub report: MatchReport,
    pub playlist_id: Option<String>,
    pub tracks_added: usize,
}

/// Full migration: source feed → catalog playlist
pub async fn run_migration(
    feed: &dyn SourceFeed,
    auth: &dyn AuthProvider,
    connector: &dyn CatalogConnector,
    plan: &MigrationPlan,
    cancel: CancellationToken,
) -> RunResult<MigrationSummary> {
    info!("STEP 1: Fetching source playlist...");
    let items = feed
        .fetch()
        .await
        .map_err(|e| RunError::abort(RunStage::FetchSource, e))?;
    info!("Retrieved {} source tracks", items.len());

    info!("STEP 2: Exporting source tracks...");
    tables::export_source(&items, &plan.output_dir)
        .map_err(|e| RunError::abort(RunStage::ExportSource, e))?;

    info!("STEP 3: Authenticating with catalog...");
    let clients = connect(auth, connector).await?;

    info!("STEP 4: Matching {} tracks...", items.len());
    let pipeline = MatchPipeline::new(clients.search.clone(), plan.resolver.clone(), plan.workers);
    let source_count = items.len();
    let report = pipeline.run(items, cancel.clone()).await;
    info!(
        "Matching completed. Success: {}/{}",
        report.matched_count, report.total_count
    );

    tables::export_results(&report, &plan.output_dir)
        .map_err(|e| RunError::abort(RunStage::ExportResults, e))?;

    // Partial results are exported above; the playlist is left untouched
    if cancel.is_cancelled() {
        return Err(RunError::abort(
            RunStage::Match,
            format!(
                "interrupted after {} of {} items",
                report.total_count, source_count
            ),
        ));
    }

    let Some(decision) = &plan.playlist else {
        info!("Skipping playlist operations");
        return Ok(MigrationSummary {
            report,
            playlist_id: None,
            tracks_added: 0,
        });
    };

    info!("STEP 5: Starting playlist operations...");
    let uris = report.matched_uris();
    let (playlist_id, tracks_added) = fill_playlist(clients.sink.as_ref(), decision, &uris).await?;

    Ok(MigrationSummary {
        report,
        playlist_id: Some(playlist_id),
        tracks_added,
    })
}

/// Import a matched export into a catalog playlist
///
/// Returns `None` when the export holds no track URLs.
pub async fn run_import(
    matched_csv: &Path,
    format: &CatalogFormat,
    auth: &dyn AuthProvider,
    connector: &dyn CatalogConnector,
    decision: &PlaylistDecision,
) -> RunResult<Option<(String, usize)>> {
    let uris: Vec<String> = tables::read_matched_uris(matched_csv, format)
        .map_err(|e| RunError::abort(RunStage::ExportResults, e))?
        .iter()
        .map(|uri| uri.to_string())
        .collect();

    if uris.is_empty() {
        info!("No valid track URLs found in {}", matched_csv.display());
        return Ok(None);
    }

    let clients = connect(auth, connector).await?;
    let result = fill_playlist(clients.sink.as_ref(), decision, &uris).await?;
    info!("Playlist update complete!");
    Ok(Some(result))
}

async fn connect(
    auth: &dyn AuthProvider,
    connector: &dyn CatalogConnector,
) -> RunResult<CatalogClients> {
    let session = auth
        .session()
        .await
        .map_err(|e| RunError::abort(RunStage::Authenticate, e))?;
    let clients = connector
        .connect(session)
        .map_err(|e| RunError::abort(RunStage::Authenticate, e))?;
    info!("Catalog authentication successful");
    Ok(clients)
}

async fn fill_playlist(
    sink: &dyn PlaylistSink,
    decision: &PlaylistDecision,
    uris: &[String],
) -> RunResult<(String, usize)> {
    let playlist_id = playlist::resolve_playlist(sink, decision)
        .await
        .map_err(|e| RunError::abort(RunStage::Playlist, e))?;

    info!("STEP 6: Adding {} tracks to playlist...", uris.len());
    let added = playlist::add_tracks(sink, &playlist_id, uris)
        .await
        .map_err(|e| RunError::abort(RunStage::Playlist, e))?;

    Ok((playlist_id, added))
}
