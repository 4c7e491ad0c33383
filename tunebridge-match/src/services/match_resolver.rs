//! Match resolution for one source item
//!
//! **Algorithm:**
//! 1. Extract (artist, track) from the title
//! 2. Build query candidates, most specific first
//! 3. Search each candidate in order (paced); stop at the first non-empty
//!    result set and adopt its top-ranked hit
//! 4. No candidate returned anything: `Unmatched`, with the last query tried
//! 5. Search failure: `Error(reason)`, with the query that was in flight
//!
//! The first non-empty result set is accepted as-is. Hits are not scored
//! against the extracted artist or track.

use super::{artist_track_extractor, query_builder};
use crate::boundaries::SearchBoundary;
use crate::models::{CatalogFormat, CatalogUri, MatchOutcome, SourceItem};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Minimum delay between consecutive search calls of one resolver
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// Hits requested per search call
pub const DEFAULT_RESULT_LIMIT: u32 = 5;

/// Resolver tuning
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub pacing: Duration,
    pub result_limit: u32,
    pub format: CatalogFormat,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            pacing: DEFAULT_PACING,
            result_limit: DEFAULT_RESULT_LIMIT,
            format: CatalogFormat::default(),
        }
    }
}

/// Resolves source items against the catalog search boundary
///
/// Owns its rate limiter: one resolver per logical worker.
pub struct MatchResolver {
    search: Arc<dyn SearchBoundary>,
    /// `None` only for a zero pacing interval
    rate_limiter: Option<DefaultDirectRateLimiter>,
    result_limit: u32,
    format: CatalogFormat,
}

impl MatchResolver {
    pub fn new(search: Arc<dyn SearchBoundary>, settings: ResolverSettings) -> Self {
        Self {
            search,
            rate_limiter: Quota::with_period(settings.pacing).map(RateLimiter::direct),
            result_limit: settings.result_limit,
            format: settings.format,
        }
    }

    /// Resolve one item. Failures are returned as `Error` outcomes, never propagated.
    pub async fn resolve(&self, item: &SourceItem) -> MatchOutcome {
        let extraction = artist_track_extractor::extract(&item.title);
        let candidates = query_builder::build(extraction.artist.as_deref(), &extraction.track);

        debug!(
            position = item.position,
            artist = ?extraction.artist,
            track = %extraction.track,
            candidates = candidates.len(),
            "Resolving item"
        );

        let mut last_query: Option<&str> = None;

        for query in &candidates {
            if let Some(limiter) = &self.rate_limiter {
                limiter.until_ready().await;
            }

            let hits = match self.search.search(query, self.result_limit).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(position = item.position, query = %query, error = %e, "Search failed");
                    return MatchOutcome::failed(item.clone(), Some(query.as_str()), e.to_string());
                }
            };

            let Some(top) = hits.into_iter().next() else {
                debug!(position = item.position, query = %query, "No results");
                last_query = Some(query.as_str());
                continue;
            };

            return match CatalogUri::parse(&top.uri) {
                Ok(uri) => {
                    let url = self.format.to_url(&uri);
                    debug!(position = item.position, query = %query, uri = %uri, "Matched");
                    MatchOutcome::matched(item.clone(), uri, url, query.as_str())
                }
                Err(e) => {
                    warn!(position = item.position, query = %query, error = %e, "Malformed hit");
                    MatchOutcome::failed(item.clone(), Some(query.as_str()), e.to_string())
                }
            };
        }

        MatchOutcome::unmatched(item.clone(), last_query.map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundaries::CatalogHit;
    use crate::error::SearchError;
    use async_trait::async_trait;

    struct NoHits;

    #[async_trait]
    impl SearchBoundary for NoHits {
        async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<CatalogHit>, SearchError> {
            Ok(Vec::new())
        }
    }

    fn resolver(pacing: Duration) -> MatchResolver {
        MatchResolver::new(
            Arc::new(NoHits),
            ResolverSettings {
                pacing,
                ..ResolverSettings::default()
            },
        )
    }

    #[test]
    fn test_default_pacing_builds_limiter() {
        assert!(resolver(DEFAULT_PACING).rate_limiter.is_some());
    }

    #[test]
    fn test_zero_pacing_has_no_limiter() {
        assert!(resolver(Duration::ZERO).rate_limiter.is_none());
    }

    #[tokio::test]
    async fn test_first_search_is_not_delayed() {
        let resolver = resolver(Duration::from_secs(5));
        let start = std::time::Instant::now();

        let outcome = resolver.resolve(&SourceItem::new("Song", "id", "c", 1)).await;

        assert!(!outcome.is_matched());
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
