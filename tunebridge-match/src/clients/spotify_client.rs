//! Catalog API client
//!
//! Implements both the search boundary and the playlist sink on top of one
//! authenticated session. Pacing of search calls is the resolver's job, not
//! this client's.

use super::http_client;
use crate::boundaries::{CatalogHit, CatalogSession, PlaylistSink, SearchBoundary};
use crate::error::{PlaylistError, SearchError};
use crate::workflow::{CatalogClients, CatalogConnector};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    uri: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<Artist>,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct IdOnly {
    id: String,
}

/// Catalog API client bound to one session
pub struct SpotifyClient {
    client: reqwest::Client,
    session: CatalogSession,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(session: CatalogSession) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client()?,
            session,
            base_url: SPOTIFY_API_URL.to_string(),
        })
    }

    /// Point the client at another API root (mirrors, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn current_user_id(&self) -> Result<String, PlaylistError> {
        let response = self
            .client
            .get(format!("{}/me", self.base_url))
            .bearer_auth(self.session.access_token())
            .send()
            .await
            .map_err(|e| PlaylistError::Network(e.to_string()))?;

        let user: IdOnly = playlist_json(response, "current user").await?;
        Ok(user.id)
    }
}

fn parse_search_response(body: &str) -> Result<Vec<CatalogHit>, SearchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(response
        .tracks
        .map(|page| page.items)
        .unwrap_or_default()
        .into_iter()
        .map(|track| CatalogHit {
            uri: track.uri,
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
        })
        .collect())
}

async fn playlist_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T, PlaylistError> {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED => return Err(PlaylistError::Unauthorized),
        StatusCode::NOT_FOUND => return Err(PlaylistError::NotFound(what.to_string())),
        s if !s.is_success() => {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PlaylistError::Api(s.as_u16(), error_text));
        }
        _ => {}
    }

    response
        .json()
        .await
        .map_err(|e| PlaylistError::Parse(e.to_string()))
}

#[async_trait]
impl SearchBoundary for SpotifyClient {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CatalogHit>, SearchError> {
        debug!(query = %query, limit, "Querying catalog search");

        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .bearer_auth(self.session.access_token())
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => return Err(SearchError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(SearchError::RateLimited),
            s if !s.is_success() => {
                let error_text = response.text().await.unwrap_or_default();
                return Err(SearchError::Api(s.as_u16(), error_text));
            }
            _ => {}
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;
        parse_search_response(&body)
    }
}

#[async_trait]
impl PlaylistSink for SpotifyClient {
    async fn create_playlist(&self, name: &str, public: bool) -> Result<String, PlaylistError> {
        let user_id = self.current_user_id().await?;

        let response = self
            .client
            .post(format!("{}/users/{}/playlists", self.base_url, user_id))
            .bearer_auth(self.session.access_token())
            .json(&json!({ "name": name, "public": public }))
            .send()
            .await
            .map_err(|e| PlaylistError::Network(e.to_string()))?;

        let created: IdOnly = playlist_json(response, &format!("user {}", user_id)).await?;
        Ok(created.id)
    }

    async fn open_playlist(&self, playlist_id: &str) -> Result<String, PlaylistError> {
        let response = self
            .client
            .get(format!("{}/playlists/{}", self.base_url, playlist_id))
            .bearer_auth(self.session.access_token())
            .query(&[("fields", "id")])
            .send()
            .await
            .map_err(|e| PlaylistError::Network(e.to_string()))?;

        let playlist: IdOnly = playlist_json(response, playlist_id).await?;
        Ok(playlist.id)
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), PlaylistError> {
        let response = self
            .client
            .post(format!("{}/playlists/{}/tracks", self.base_url, playlist_id))
            .bearer_auth(self.session.access_token())
            .json(&json!({ "uris": uris }))
            .send()
            .await
            .map_err(|e| PlaylistError::Network(e.to_string()))?;

        let _: serde_json::Value = playlist_json(response, playlist_id).await?;
        Ok(())
    }
}

/// Connects sessions to the catalog API
#[derive(Debug, Clone, Default)]
pub struct SpotifyConnector {
    base_url: Option<String>,
}

impl SpotifyConnector {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }
}

impl CatalogConnector for SpotifyConnector {
    fn connect(&self, session: CatalogSession) -> Result<CatalogClients, String> {
        let mut client = SpotifyClient::new(session).map_err(|e| e.to_string())?;
        if let Some(base_url) = &self.base_url {
            client = client.with_base_url(base_url.clone());
        }
        let client = Arc::new(client);
        Ok(CatalogClients {
            search: client.clone(),
            sink: client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_hits_in_rank_order() {
        let body = r#"{"tracks": {"items": [
            {"uri": "spotify:track:first", "name": "Song", "artists": [{"name": "Band"}]},
            {"uri": "spotify:track:second", "name": "Song (Live)", "artists": []}
        ]}}"#;

        let hits = parse_search_response(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].uri, "spotify:track:first");
        assert_eq!(hits[0].artists, vec!["Band"]);
        assert_eq!(hits[1].name, "Song (Live)");
    }

    #[test]
    fn test_parse_empty_search() {
        assert!(parse_search_response(r#"{"tracks": {"items": []}}"#)
            .unwrap()
            .is_empty());
        assert!(parse_search_response("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_search() {
        assert!(matches!(
            parse_search_response(r#"{"tracks": {"items": [{"name": "no uri"}]}}"#),
            Err(SearchError::Parse(_))
        ));
    }
}
