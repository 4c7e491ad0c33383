//! Artist/track extraction result

use serde::{Deserialize, Serialize};

/// Structured identity inferred from a free-text title
///
/// `artist` is `None` (never an empty string) when no artist could be
/// isolated. `track` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub artist: Option<String>,
    pub track: String,
}

impl ExtractionResult {
    /// Result with both fields; a blank artist collapses to `None`
    pub fn new(artist: Option<String>, track: impl Into<String>) -> Self {
        Self {
            artist: artist
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            track: track.into(),
        }
    }

    /// Track-only result
    pub fn track_only(track: impl Into<String>) -> Self {
        Self {
            artist: None,
            track: track.into(),
        }
    }
}
