//! Per-item match outcome

use super::{CatalogUri, SourceItem};
use serde::{Deserialize, Serialize};

/// Recorded as `query_used` when a failure happened before any search call
pub const NO_QUERY: &str = "N/A";

/// Resolution status of one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// A query candidate returned at least one hit
    Matched,
    /// Every query candidate returned an empty result set
    Unmatched,
    /// The search boundary failed; carries the failure description
    Error(String),
}

impl MatchStatus {
    /// Short marker used in status lines and exports
    pub fn symbol(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "✅",
            MatchStatus::Unmatched => "❌",
            MatchStatus::Error(_) => "⚠️",
        }
    }
}

/// Outcome of resolving one source item against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub source_item: SourceItem,
    pub catalog_uri: Option<CatalogUri>,
    pub catalog_url: Option<String>,
    pub query_used: Option<String>,
    pub status: MatchStatus,
}

impl MatchOutcome {
    pub fn matched(
        source_item: SourceItem,
        uri: CatalogUri,
        url: String,
        query: impl Into<String>,
    ) -> Self {
        Self {
            source_item,
            catalog_uri: Some(uri),
            catalog_url: Some(url),
            query_used: Some(query.into()),
            status: MatchStatus::Matched,
        }
    }

    pub fn unmatched(source_item: SourceItem, last_query: Option<String>) -> Self {
        Self {
            source_item,
            catalog_uri: None,
            catalog_url: None,
            query_used: last_query,
            status: MatchStatus::Unmatched,
        }
    }

    /// Error outcome; `in_flight` is the candidate being searched when it failed
    pub fn failed(source_item: SourceItem, in_flight: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            source_item,
            catalog_uri: None,
            catalog_url: None,
            query_used: Some(in_flight.unwrap_or(NO_QUERY).to_string()),
            status: MatchStatus::Error(reason.into()),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.status == MatchStatus::Matched
    }

    /// `query_used` for display and export
    pub fn query_label(&self) -> &str {
        self.query_used.as_deref().unwrap_or(NO_QUERY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> SourceItem {
        SourceItem::new("Artist - Song", "vid1", "Chan", 1)
    }

    #[test]
    fn test_failed_before_any_call_uses_sentinel() {
        let outcome = MatchOutcome::failed(item(), None, "boom");
        assert_eq!(outcome.query_used.as_deref(), Some(NO_QUERY));
        assert_eq!(outcome.status, MatchStatus::Error("boom".to_string()));
        assert!(!outcome.is_matched());
    }

    #[test]
    fn test_failed_records_in_flight_query() {
        let outcome = MatchOutcome::failed(item(), Some("Artist Song"), "timeout");
        assert_eq!(outcome.query_label(), "Artist Song");
    }

    #[test]
    fn test_status_symbols() {
        assert_eq!(MatchStatus::Matched.symbol(), "✅");
        assert_eq!(MatchStatus::Unmatched.symbol(), "❌");
        assert_eq!(MatchStatus::Error("x".into()).symbol(), "⚠️");
    }
}
