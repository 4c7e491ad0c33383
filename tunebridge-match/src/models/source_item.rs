//! Source playlist entry

use serde::{Deserialize, Serialize};

/// One entry harvested from the source playlist
///
/// Immutable once fetched. `position` is 1-based and contiguous within a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    /// Free-text title as shown on the video platform
    pub title: String,
    /// Platform video identifier
    pub external_id: String,
    /// Watch URL
    pub url: String,
    /// Uploading channel name
    pub channel: String,
    /// 1-based position in the source playlist
    pub position: u32,
}

impl SourceItem {
    pub fn new(
        title: impl Into<String>,
        external_id: impl Into<String>,
        channel: impl Into<String>,
        position: u32,
    ) -> Self {
        let external_id = external_id.into();
        Self {
            title: title.into(),
            url: format!("https://youtu.be/{}", external_id),
            external_id,
            channel: channel.into(),
            position,
        }
    }
}
