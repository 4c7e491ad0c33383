//! Batch-level aggregation of match outcomes

use super::{MatchOutcome, MatchStatus};
use serde::{Deserialize, Serialize};

/// Number of unmatched titles listed in the run summary
pub const SUMMARY_SAMPLE_SIZE: usize = 10;

/// Aggregated result of one matching run
///
/// Invariants: `total_count == outcomes.len()` and `matched_count` equals the
/// number of `Matched` outcomes. Outcome order is input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub total_count: usize,
    pub matched_count: usize,
    pub outcomes: Vec<MatchOutcome>,
}

impl MatchReport {
    pub fn aggregate(outcomes: Vec<MatchOutcome>) -> Self {
        let matched_count = outcomes.iter().filter(|o| o.is_matched()).count();
        Self {
            total_count: outcomes.len(),
            matched_count,
            outcomes,
        }
    }

    /// Fraction of matched items (0.0 for an empty run)
    pub fn success_ratio(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.matched_count as f64 / self.total_count as f64
        }
    }

    /// Titles of Unmatched and Error outcomes, in input order
    pub fn unmatched_titles(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_matched())
            .map(|o| o.source_item.title.as_str())
            .collect()
    }

    /// Catalog URIs of matched outcomes, in input order
    pub fn matched_uris(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|o| o.catalog_uri.as_ref())
            .map(|uri| uri.to_string())
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, MatchStatus::Error(_)))
            .count()
    }

    /// Human-readable run summary
    pub fn display_string(&self) -> String {
        let mut out = format!(
            "Successfully matched: {}/{} ({:.1}%)",
            self.matched_count,
            self.total_count,
            self.success_ratio() * 100.0
        );

        let unmatched = self.unmatched_titles();
        if !unmatched.is_empty() {
            out.push_str("\n\nThese tracks weren't found in the catalog:");
            for title in unmatched.iter().take(SUMMARY_SAMPLE_SIZE) {
                out.push_str(&format!("\n  - {}", title));
            }
            if unmatched.len() > SUMMARY_SAMPLE_SIZE {
                out.push_str(&format!(
                    "\n  (...and {} more)",
                    unmatched.len() - SUMMARY_SAMPLE_SIZE
                ));
            }
        }

        out
    }
}
