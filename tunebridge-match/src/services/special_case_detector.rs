//! Special-case title shapes
//!
//! Recognizes title shapes that defeat generic artist/track splitting and
//! resolves them before normalization. Matching is case-insensitive and runs
//! on the raw title. First hit wins:
//! 1. Mixes and playlists: track = text before the first `|`
//! 2. Full albums/EPs: track = text before the first `[`
//! 3. Cover attributions `(<original artist> cover)`: artist = original
//!    artist, track = title without that span
//!
//! Mixes keep the whole remainder as one track. Splitting a mix into its
//! entries would need the video description or timestamps, which the source
//! feed does not provide.

use once_cell::sync::Lazy;
use regex::Regex;

const MIX_MARKERS: &[&str] = &["math rock", "midwest emo", "mix", "playlist"];
const ALBUM_MARKERS: &[&str] = &["full album", "full ep", "[full]"];

static COVER_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(([^()]*?)\s*\bcover\)").expect("cover span pattern"));

static COVER_SPAN_WITH_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*\([^()]*?\bcover\)").expect("cover removal pattern"));

/// Overrides produced by a special case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialCase {
    pub artist: Option<String>,
    pub track: Option<String>,
}

impl SpecialCase {
    /// Whether a special case produced a track (and extraction can stop)
    pub fn is_resolved(&self) -> bool {
        self.track.is_some()
    }
}

/// Detect special-case title shapes in a raw title
pub fn detect(raw_title: &str) -> SpecialCase {
    let lower = raw_title.to_lowercase();

    if MIX_MARKERS.iter().any(|m| lower.contains(m)) {
        tracing::debug!(title = %raw_title, "Special case: mix/playlist");
        return SpecialCase {
            artist: None,
            track: Some(text_before(raw_title, '|')),
        };
    }

    if ALBUM_MARKERS.iter().any(|m| lower.contains(m)) {
        tracing::debug!(title = %raw_title, "Special case: full album");
        return SpecialCase {
            artist: None,
            track: Some(text_before(raw_title, '[')),
        };
    }

    if let Some(caps) = COVER_SPAN.captures(raw_title) {
        let original_artist = caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .filter(|a| !a.is_empty());
        let track = COVER_SPAN_WITH_SPACE
            .replace_all(raw_title, "")
            .trim()
            .to_string();

        tracing::debug!(
            title = %raw_title,
            original_artist = ?original_artist,
            "Special case: cover attribution"
        );
        return SpecialCase {
            artist: original_artist,
            track: Some(track),
        };
    }

    SpecialCase::default()
}

fn text_before(title: &str, delimiter: char) -> String {
    title
        .split(delimiter)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
