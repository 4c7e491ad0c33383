//! Unmatched-title pattern analysis
//!
//! Buckets unmatched titles by the qualifier that most likely defeated
//! matching, to show which special cases are worth adding next. Each title
//! lands in the first bucket whose keyword it contains (case-insensitive):
//! covers, remixes, live, instrumental, mixes.

use serde::Serialize;

/// Unmatched titles grouped by likely cause
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnmatchedPatterns {
    pub covers: Vec<String>,
    pub remixes: Vec<String>,
    pub live: Vec<String>,
    pub instrumental: Vec<String>,
    pub mixes: Vec<String>,
}

impl UnmatchedPatterns {
    /// Number of bucketed titles
    pub fn categorized(&self) -> usize {
        self.covers.len()
            + self.remixes.len()
            + self.live.len()
            + self.instrumental.len()
            + self.mixes.len()
    }

    /// Buckets with their labels, in classification order
    pub fn buckets(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Covers", self.covers.as_slice()),
            ("Remixes", self.remixes.as_slice()),
            ("Live", self.live.as_slice()),
            ("Instrumental", self.instrumental.as_slice()),
            ("Mixes", self.mixes.as_slice()),
        ]
    }

    pub fn display_string(&self) -> String {
        format!(
            "covers: {}, remixes: {}, live: {}, instrumental: {}, mixes: {}",
            self.covers.len(),
            self.remixes.len(),
            self.live.len(),
            self.instrumental.len(),
            self.mixes.len()
        )
    }
}

/// Bucket unmatched titles
pub fn analyze_unmatched<'a, I>(titles: I) -> UnmatchedPatterns
where
    I: IntoIterator<Item = &'a str>,
{
    let mut patterns = UnmatchedPatterns::default();

    for title in titles {
        let lower = title.to_lowercase();
        let bucket = if lower.contains("cover") {
            &mut patterns.covers
        } else if lower.contains("remix") {
            &mut patterns.remixes
        } else if lower.contains("live") {
            &mut patterns.live
        } else if lower.contains("instrumental") {
            &mut patterns.instrumental
        } else if lower.contains("mix") {
            &mut patterns.mixes
        } else {
            continue;
        };
        bucket.push(title.to_string());
    }

    patterns
}
