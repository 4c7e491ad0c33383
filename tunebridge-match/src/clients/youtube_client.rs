//! Video platform playlist feed
//!
//! Pages through the playlistItems endpoint, 50 items per page, following
//! `nextPageToken`. Pages are paced at one per second to stay inside the
//! API quota. Items without a title or video id are skipped.

use super::http_client;
use crate::boundaries::SourceFeed;
use crate::error::FeedError;
use crate::models::SourceItem;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::Deserialize;
use std::num::NonZeroU32;
use tracing::{debug, info, warn};

const YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
const PAGE_SIZE: u32 = 50;
const UNKNOWN_CHANNEL: &str = "Unknown Channel";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsPage {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    resource_id: Option<ResourceId>,
    video_owner_channel_title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

/// Source feed over one video platform playlist
pub struct YouTubePlaylistFeed {
    client: reqwest::Client,
    rate_limiter: DefaultDirectRateLimiter,
    base_url: String,
    api_key: String,
    playlist_id: String,
}

impl YouTubePlaylistFeed {
    pub fn new(api_key: Option<String>, playlist_id: String) -> Result<Self, FeedError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FeedError::NotConfigured("API key missing".to_string()))?;
        let client = http_client().map_err(|e| FeedError::Network(e.to_string()))?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(Quota::per_second(NonZeroU32::MIN)),
            base_url: YOUTUBE_API_URL.to_string(),
            api_key,
            playlist_id,
        })
    }

    /// Point the feed at another API root (mirrors, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_page(&self, page_token: Option<&str>) -> Result<PlaylistItemsPage, FeedError> {
        self.rate_limiter.until_ready().await;

        let page_size = PAGE_SIZE.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("playlistId", self.playlist_id.as_str()),
            ("maxResults", page_size.as_str()),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let response = self
            .client
            .get(format!("{}/playlistItems", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FeedError::Api(status.as_u16(), error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        parse_page(&body)
    }
}

fn parse_page(body: &str) -> Result<PlaylistItemsPage, FeedError> {
    serde_json::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))
}

/// Convert one page into source items, numbering from `next_position`
fn page_items(page: PlaylistItemsPage, next_position: &mut u32) -> Vec<SourceItem> {
    let mut items = Vec::with_capacity(page.items.len());

    for raw in page.items {
        let Some(snippet) = raw.snippet else {
            warn!("Skipping malformed playlist item (missing field: snippet)");
            continue;
        };
        let Some(title) = snippet.title else {
            warn!("Skipping malformed playlist item (missing field: title)");
            continue;
        };
        let Some(video_id) = snippet.resource_id.and_then(|r| r.video_id) else {
            warn!(title = %title, "Skipping malformed playlist item (missing field: videoId)");
            continue;
        };

        let channel = snippet
            .video_owner_channel_title
            .unwrap_or_else(|| UNKNOWN_CHANNEL.to_string());

        items.push(SourceItem::new(title, video_id, channel, *next_position));
        *next_position += 1;
    }

    items
}

#[async_trait]
impl SourceFeed for YouTubePlaylistFeed {
    async fn fetch(&self) -> Result<Vec<SourceItem>, FeedError> {
        info!(playlist_id = %self.playlist_id, "Fetching source playlist");

        let mut items = Vec::new();
        let mut next_position = 1;
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            let fetched = page.items.len();
            page_token = page.next_page_token.clone();

            items.extend(page_items(page, &mut next_position));
            info!("Fetched {} items (Total: {})", fetched, items.len());

            if page_token.is_none() {
                break;
            }
            debug!("Following next page token");
        }

        Ok(items)
    }
}
