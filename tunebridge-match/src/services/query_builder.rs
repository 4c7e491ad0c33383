//! Search query candidates
//!
//! Turns an (artist, track) pair into search queries, most specific first:
//! 1. `artist:<artist> track:<track>` (field-scoped)
//! 2. `<artist> <track>` (free text)
//! 3. `<track>` (track only)
//!
//! Without a usable artist the only candidate is `track:<track>`.
//! Later candidates are only tried when earlier ones return nothing.

use once_cell::sync::Lazy;
use regex::Regex;

static ARTIST_BRAND_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\s*-\s*topic|\s*vevo|\s*official)$").expect("artist suffix pattern")
});

const VARIOUS_ARTISTS: &str = "various artists";

/// Build ordered query candidates. Never returns an empty list.
pub fn build(artist: Option<&str>, track: &str) -> Vec<String> {
    let cleaned = artist
        .filter(|a| !a.trim().eq_ignore_ascii_case(VARIOUS_ARTISTS))
        .map(clean_artist)
        .filter(|a| !a.is_empty());

    match cleaned {
        None => vec![format!("track:{}", track)],
        Some(artist) => vec![
            format!("artist:{} track:{}", artist, track),
            format!("{} {}", artist, track),
            track.to_string(),
        ],
    }
}

/// Remove a trailing channel brand (`- Topic`, `VEVO`, `Official`) from an artist
pub fn clean_artist(artist: &str) -> String {
    ARTIST_BRAND_SUFFIX.replace(artist.trim(), "").trim().to_string()
}
