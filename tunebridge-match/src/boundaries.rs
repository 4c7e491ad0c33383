//! External collaborator contracts
//!
//! The engine only depends on these traits. Concrete implementations live in
//! [`crate::clients`]; tests provide in-process mocks.

use crate::error::{AuthError, FeedError, PlaylistError, SearchError};
use crate::models::SourceItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One ranked search hit from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogHit {
    /// `<namespace>:track:<opaque-id>`
    pub uri: String,
    /// Track name as listed in the catalog
    #[serde(default)]
    pub name: String,
    /// Credited artist names
    #[serde(default)]
    pub artists: Vec<String>,
}

impl CatalogHit {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: String::new(),
            artists: Vec::new(),
        }
    }
}

/// Authenticated catalog session, acquired once per run and injected
#[derive(Clone)]
pub struct CatalogSession {
    access_token: String,
}

impl CatalogSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for CatalogSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogSession")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Ordered source playlist entries (1-based, contiguous positions)
#[async_trait]
pub trait SourceFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<SourceItem>, FeedError>;
}

/// Catalog track search
///
/// An empty result means "no results", not an error.
#[async_trait]
pub trait SearchBoundary: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CatalogHit>, SearchError>;
}

/// Supplies a ready-to-use catalog session
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn session(&self) -> Result<CatalogSession, AuthError>;
}

/// Destination playlist operations
///
/// `append_tracks` receives at most [`crate::playlist::MAX_TRACKS_PER_REQUEST`]
/// URIs per call; chunking is done by [`crate::playlist::add_tracks`].
#[async_trait]
pub trait PlaylistSink: Send + Sync {
    /// Create a playlist owned by the session user; returns its id
    async fn create_playlist(&self, name: &str, public: bool) -> Result<String, PlaylistError>;

    /// Confirm an existing playlist is reachable; returns its id
    async fn open_playlist(&self, playlist_id: &str) -> Result<String, PlaylistError>;

    /// Append one batch of track URIs, preserving order
    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), PlaylistError>;
}
