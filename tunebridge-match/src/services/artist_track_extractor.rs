//! Artist/track extraction
//!
//! **Algorithm:**
//! 1. Special-case detection on the raw title; if it yields a track, done
//! 2. Normalize the title
//! 3. Try each rule of [`TITLE_RULES`] in order; the first rule whose pattern
//!    matches with a non-empty artist and track wins
//! 4. No rule matched: track-only result with the normalized title
//!
//! Rule order is priority. Qualifier-aware rules (featured artist, live,
//! cover, remix) run before the generic delimiter rules so qualifier text
//! never ends up inside the track.

use super::{special_case_detector, title_normalizer};
use crate::models::ExtractionResult;
use once_cell::sync::Lazy;
use regex::Regex;

/// One structural pattern of the extraction cascade
///
/// Capture group 1 is the artist, group 2 the track. `featured_groups`
/// lists optional groups holding a featured artist; the first non-empty one
/// is appended to the track as ` (feat. <name>)`.
pub struct TitleRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub featured_groups: &'static [usize],
}

impl TitleRule {
    fn new(name: &'static str, pattern: &str, featured_groups: &'static [usize]) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("title rule pattern"),
            featured_groups,
        }
    }

    /// Apply this rule; `None` when it does not match or isolates nothing
    pub fn apply(&self, title: &str) -> Option<ExtractionResult> {
        let caps = self.pattern.captures(title)?;
        let artist = caps.get(1)?.as_str().trim();
        let mut track = caps.get(2)?.as_str().trim().to_string();

        if artist.is_empty() || track.is_empty() {
            return None;
        }

        let featured = self
            .featured_groups
            .iter()
            .filter_map(|&g| caps.get(g))
            .map(|m| m.as_str().trim())
            .find(|f| !f.is_empty());

        if let Some(featured) = featured {
            track = format!("{} (feat. {})", track, featured);
        }

        Some(ExtractionResult::new(Some(artist.to_string()), track))
    }
}

/// The ordered extraction cascade
pub static TITLE_RULES: Lazy<Vec<TitleRule>> = Lazy::new(|| {
    vec![
        // "Artist - Track ft. Someone" / "Artist - Track (feat. Someone)"
        TitleRule::new(
            "featured_artist",
            r"(?i)^(.*?)\s*[-‐‑‒–—−~|]\s*([^(\[{]+?)\s*(?:\(\s*f(?:ea)?t\.\s*(.*?)\)|\bf(?:ea)?t\.\s*(.*?))(?:\s*[(\[]|\s*$)",
            &[3, 4],
        ),
        // "Artist - Track (Live at ...)"
        TitleRule::new(
            "live_qualifier",
            r"(?i)^(.*?)\s*[-‐‑‒–—−~|]\s*(.*?)\s*(?:\(live[^)]*\)|\[live[^\]]*\])",
            &[],
        ),
        // "Artist - Track (Cover ...)"
        TitleRule::new(
            "cover_qualifier",
            r"(?i)^(.*?)\s*[-‐‑‒–—−~|]\s*(.*?)\s*(?:\(cover[^)]*\)|\[cover[^\]]*\])",
            &[],
        ),
        // "Artist - Track (Someone Remix)"
        TitleRule::new(
            "remix_qualifier",
            r"(?i)^(.*?)\s*[-‐‑‒–—−~|]\s*(.*?)\s*(?:\(.*?remix\)|\[.*?remix\])",
            &[],
        ),
        // "Artist - Track (anything)"
        TitleRule::new(
            "delimited_paren_qualifier",
            r"(?i)^(.*?)\s*[-‐‑‒–—−:|~]\s*(.*?)(?:\s+\(.*\))?$",
            &[],
        ),
        // "Artist - Track [anything]"
        TitleRule::new(
            "delimited_bracket_qualifier",
            r"(?i)^(.*?)\s*[-‐‑‒–—−:|~]\s*(.*?)(?:\s+\[.*\])?$",
            &[],
        ),
        // Artist "Track"
        TitleRule::new("quoted_title", r#"(?i)^(.*?)\s*["“](.+?)["”]"#, &[]),
        // "Artist - Track"
        TitleRule::new("delimited", r"(?i)^(.*?)\s*[-‐‑‒–—−:|~]\s*(.*)$", &[]),
        // Last resort: split on the last hyphen-family delimiter
        TitleRule::new("last_hyphen", r"^(.*)\s*[-‐‑‒–—−]\s*(.*)$", &[]),
    ]
});

/// Extract (artist, track) from a raw title. Never fails.
pub fn extract(raw_title: &str) -> ExtractionResult {
    let special = special_case_detector::detect(raw_title);
    if let Some(track) = special.track {
        return ExtractionResult::new(special.artist, track);
    }

    let normalized = title_normalizer::normalize(raw_title);
    if normalized.is_empty() {
        return ExtractionResult::track_only(raw_title.trim());
    }

    apply_rules(&normalized)
}

/// Run the rule cascade on an already-normalized title
pub fn apply_rules(title: &str) -> ExtractionResult {
    TITLE_RULES
        .iter()
        .find_map(|rule| {
            rule.apply(title).map(|result| {
                tracing::debug!(rule = rule.name, title = %title, "Title rule matched");
                result
            })
        })
        .unwrap_or_else(|| ExtractionResult::track_only(title))
}
