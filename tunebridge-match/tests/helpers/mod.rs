//! Test doubles for the external boundaries
//!
//! Each integration test file pulls this in with `mod helpers;`, so not every
//! file uses every double.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;
use tunebridge_match::boundaries::{
    AuthProvider, CatalogHit, CatalogSession, PlaylistSink, SearchBoundary, SourceFeed,
};
use tunebridge_match::error::{AuthError, FeedError, PlaylistError, SearchError};
use tunebridge_match::models::SourceItem;
use tunebridge_match::services::ResolverSettings;
use tunebridge_match::workflow::{CatalogClients, CatalogConnector};

/// Canned answer for one query
#[derive(Clone)]
pub enum Scripted {
    Hits(Vec<&'static str>),
    Fail(&'static str),
}

/// Search double answering from a query → response table
///
/// Unknown queries return no hits. Every call is logged with its time.
#[derive(Default)]
pub struct ScriptedSearch {
    responses: HashMap<String, Scripted>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query: &str, response: Scripted) -> Self {
        self.responses.insert(query.to_string(), response);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(q, _)| q.clone())
            .collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl SearchBoundary for ScriptedSearch {
    async fn search(&self, query: &str, _limit: u32) -> Result<Vec<CatalogHit>, SearchError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), Instant::now()));

        match self.responses.get(query) {
            Some(Scripted::Hits(uris)) => Ok(uris.iter().map(|u| CatalogHit::new(*u)).collect()),
            Some(Scripted::Fail(reason)) => Err(SearchError::Network(reason.to_string())),
            None => Ok(Vec::new()),
        }
    }
}

/// One call made against the recording sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Create { name: String, public: bool },
    Open(String),
    Append { playlist_id: String, uris: Vec<String> },
}

/// Playlist sink double that records calls
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
    fail_appends: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_appends() -> Self {
        Self {
            fail_appends: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn appended_batches(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SinkCall::Append { uris, .. } => Some(uris),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl PlaylistSink for RecordingSink {
    async fn create_playlist(&self, name: &str, public: bool) -> Result<String, PlaylistError> {
        self.calls.lock().unwrap().push(SinkCall::Create {
            name: name.to_string(),
            public,
        });
        Ok("new-playlist".to_string())
    }

    async fn open_playlist(&self, playlist_id: &str) -> Result<String, PlaylistError> {
        self.calls
            .lock()
            .unwrap()
            .push(SinkCall::Open(playlist_id.to_string()));
        Ok(playlist_id.to_string())
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), PlaylistError> {
        if self.fail_appends {
            return Err(PlaylistError::Api(500, "insert rejected".to_string()));
        }
        self.calls.lock().unwrap().push(SinkCall::Append {
            playlist_id: playlist_id.to_string(),
            uris: uris.to_vec(),
        });
        Ok(())
    }
}

/// Source feed double
pub struct StaticFeed(pub Result<Vec<SourceItem>, &'static str>);

#[async_trait]
impl SourceFeed for StaticFeed {
    async fn fetch(&self) -> Result<Vec<SourceItem>, FeedError> {
        self.0
            .clone()
            .map_err(|reason| FeedError::Api(403, reason.to_string()))
    }
}

/// Auth double: `None` means no credentials
pub struct FixedAuth(pub Option<&'static str>);

#[async_trait]
impl AuthProvider for FixedAuth {
    async fn session(&self) -> Result<CatalogSession, AuthError> {
        self.0
            .map(CatalogSession::new)
            .ok_or_else(|| AuthError::MissingCredentials("no token".to_string()))
    }
}

/// Connector handing out pre-built doubles
pub struct MockConnector {
    pub search: Arc<ScriptedSearch>,
    pub sink: Arc<RecordingSink>,
}

impl MockConnector {
    pub fn new(search: ScriptedSearch, sink: RecordingSink) -> Self {
        Self {
            search: Arc::new(search),
            sink: Arc::new(sink),
        }
    }
}

impl CatalogConnector for MockConnector {
    fn connect(&self, _session: CatalogSession) -> Result<CatalogClients, String> {
        Ok(CatalogClients {
            search: self.search.clone(),
            sink: self.sink.clone(),
        })
    }
}

pub fn item(title: &str, position: u32) -> SourceItem {
    SourceItem::new(title, format!("vid{}", position), "Some Channel", position)
}

/// Resolver settings with pacing short enough for tests
pub fn fast_settings() -> ResolverSettings {
    ResolverSettings {
        pacing: std::time::Duration::from_millis(1),
        ..ResolverSettings::default()
    }
}
