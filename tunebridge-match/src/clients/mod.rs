//! Concrete implementations of the external boundaries
//!
//! - `youtube_client`: source playlist feed
//! - `spotify_client`: catalog search + destination playlist
//! - `auth`: static-token session provider

pub mod auth;
pub mod spotify_client;
pub mod youtube_client;

pub use auth::StaticTokenAuth;
pub use spotify_client::{SpotifyClient, SpotifyConnector};
pub use youtube_client::YouTubePlaylistFeed;

use std::time::Duration;

const USER_AGENT: &str = concat!("TuneBridge/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client configuration
pub(crate) fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()
}
