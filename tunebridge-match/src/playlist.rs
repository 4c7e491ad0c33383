//! Destination playlist selection and chunked track insertion
//!
//! Whether to create a new playlist or reuse an existing one is decided by
//! the caller (CLI flags) and passed in as a [`PlaylistDecision`].

use crate::boundaries::PlaylistSink;
use crate::error::PlaylistError;
use tracing::info;

/// Destination API limit on URIs per insertion call
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Caller-supplied playlist choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistDecision {
    CreateNew { name: String, public: bool },
    /// Bare id, `spotify:playlist:<id>` URI or playlist URL
    UseExisting(String),
}

/// Reduce a playlist reference (id, URI or URL) to the bare id
pub fn playlist_id_from_reference(reference: &str) -> Result<String, PlaylistError> {
    let reference = reference.trim();

    let id = if let Some((_, rest)) = reference.split_once("/playlist/") {
        rest.split(['?', '#', '/']).next().unwrap_or_default()
    } else if let Some((_, rest)) = reference.rsplit_once(":playlist:") {
        rest
    } else {
        reference
    };

    if id.is_empty() || id.contains([':', '/', '?', ' ']) {
        return Err(PlaylistError::InvalidReference(reference.to_string()));
    }

    Ok(id.to_string())
}

/// Create or open the destination playlist; returns its id
pub async fn resolve_playlist(
    sink: &dyn PlaylistSink,
    decision: &PlaylistDecision,
) -> Result<String, PlaylistError> {
    match decision {
        PlaylistDecision::CreateNew { name, public } => {
            let id = sink.create_playlist(name, *public).await?;
            info!(playlist_id = %id, name = %name, "Created playlist");
            Ok(id)
        }
        PlaylistDecision::UseExisting(reference) => {
            let id = playlist_id_from_reference(reference)?;
            let id = sink.open_playlist(&id).await?;
            info!(playlist_id = %id, "Using existing playlist");
            Ok(id)
        }
    }
}

/// Append `uris` in order, at most [`MAX_TRACKS_PER_REQUEST`] per call
pub async fn add_tracks(
    sink: &dyn PlaylistSink,
    playlist_id: &str,
    uris: &[String],
) -> Result<usize, PlaylistError> {
    for (batch, chunk) in uris.chunks(MAX_TRACKS_PER_REQUEST).enumerate() {
        sink.append_tracks(playlist_id, chunk).await?;
        tracing::debug!(batch, size = chunk.len(), "Appended track batch");
    }

    info!(playlist_id = %playlist_id, count = uris.len(), "Added tracks to playlist");
    Ok(uris.len())
}
