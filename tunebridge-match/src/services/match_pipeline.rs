//! Batch matching pipeline
//!
//! Splits items round-robin across logical workers. Each worker owns a
//! resolver (and so a rate limiter) and processes its lane sequentially. Outcomes
//! are re-ordered by input index before aggregation, so the report follows
//! source order whatever the completion order was.

use super::match_resolver::{MatchResolver, ResolverSettings};
use crate::boundaries::SearchBoundary;
use crate::models::{MatchOutcome, MatchReport, SourceItem};
use futures::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const STATUS_TITLE_WIDTH: usize = 50;

/// Batch matching pipeline
pub struct MatchPipeline {
    search: Arc<dyn SearchBoundary>,
    settings: ResolverSettings,
    workers: usize,
}

impl MatchPipeline {
    pub fn new(search: Arc<dyn SearchBoundary>, settings: ResolverSettings, workers: usize) -> Self {
        Self {
            search,
            settings,
            workers: workers.max(1),
        }
    }

    /// Resolve every item and aggregate the outcomes
    ///
    /// Cancelling `cancel` stops each worker after its current item; the
    /// report then covers the processed items only.
    pub async fn run(&self, items: Vec<SourceItem>, cancel: CancellationToken) -> MatchReport {
        let total = items.len();
        let workers = self.workers.min(total.max(1));

        info!(total, workers, "Starting catalog matching");

        let mut lanes: Vec<Vec<(usize, SourceItem)>> = vec![Vec::new(); workers];
        for (idx, item) in items.into_iter().enumerate() {
            lanes[idx % workers].push((idx, item));
        }

        let lane_futures = lanes.into_iter().map(|lane| {
            let resolver = MatchResolver::new(self.search.clone(), self.settings.clone());
            let cancel = cancel.clone();
            async move {
                let mut outcomes = Vec::with_capacity(lane.len());
                for (idx, item) in lane {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let outcome = resolver.resolve(&item).await;
                    log_match_status(idx + 1, total, &outcome);
                    outcomes.push((idx, outcome));
                }
                outcomes
            }
        });

        let mut indexed: Vec<(usize, MatchOutcome)> =
            join_all(lane_futures).await.into_iter().flatten().collect();
        indexed.sort_by_key(|(idx, _)| *idx);

        if indexed.len() < total {
            warn!(
                processed = indexed.len(),
                skipped = total - indexed.len(),
                "Matching stopped early"
            );
        }

        MatchReport::aggregate(indexed.into_iter().map(|(_, outcome)| outcome).collect())
    }
}

/// `[idx/total] ✅ <title>` status line
pub fn status_line(idx: usize, total: usize, outcome: &MatchOutcome) -> String {
    let title = &outcome.source_item.title;
    let shown: String = title.chars().take(STATUS_TITLE_WIDTH).collect();
    let ellipsis = if title.chars().count() > STATUS_TITLE_WIDTH {
        "..."
    } else {
        ""
    };
    format!(
        "[{}/{}] {} {}{}",
        idx,
        total,
        outcome.status.symbol(),
        shown,
        ellipsis
    )
}

fn log_match_status(idx: usize, total: usize, outcome: &MatchOutcome) {
    info!("{}", status_line(idx, total, outcome));
}
