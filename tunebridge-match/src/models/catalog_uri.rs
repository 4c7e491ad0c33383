//! Catalog track identity
//!
//! Converts between the two representations of a catalog track:
//! - URI: `<namespace>:track:<opaque-id>`
//! - Browsable URL: `https://<catalog-domain>/track/<opaque-id>`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tunebridge_common::config::CatalogConfig;

/// Catalog URI conversion errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogUriError {
    #[error("Malformed catalog URI: {0}")]
    MalformedUri(String),

    #[error("Malformed catalog URL: {0}")]
    MalformedUrl(String),

    #[error("URL {url} is not on catalog domain {domain}")]
    ForeignDomain { url: String, domain: String },
}

/// Parsed catalog track URI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogUri {
    namespace: String,
    id: String,
}

impl CatalogUri {
    /// Parse `<namespace>:track:<opaque-id>`
    pub fn parse(uri: &str) -> Result<Self, CatalogUriError> {
        let mut parts = uri.trim().split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some("track"), Some(id), None)
                if !namespace.is_empty() && is_valid_id(id) =>
            {
                Ok(Self {
                    namespace: namespace.to_string(),
                    id: id.to_string(),
                })
            }
            _ => Err(CatalogUriError::MalformedUri(uri.to_string())),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for CatalogUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:track:{}", self.namespace, self.id)
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '?', '#', ':'])
}

/// Namespace + domain pair used to convert URIs to URLs and back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFormat {
    pub namespace: String,
    pub domain: String,
}

impl Default for CatalogFormat {
    fn default() -> Self {
        Self::from(&CatalogConfig::default())
    }
}

impl From<&CatalogConfig> for CatalogFormat {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            domain: config.domain.clone(),
        }
    }
}

impl CatalogFormat {
    /// `https://<domain>/track/<id>`
    pub fn to_url(&self, uri: &CatalogUri) -> String {
        format!("https://{}/track/{}", self.domain, uri.id())
    }

    /// Parse a browsable track URL back into a URI in this format's namespace
    ///
    /// Query strings and fragments (e.g. `?si=...` share tokens) are ignored.
    pub fn from_url(&self, url: &str) -> Result<CatalogUri, CatalogUriError> {
        let rest = url
            .trim()
            .strip_prefix("https://")
            .ok_or_else(|| CatalogUriError::MalformedUrl(url.to_string()))?;

        let (host, path) = rest
            .split_once('/')
            .ok_or_else(|| CatalogUriError::MalformedUrl(url.to_string()))?;

        if !host.eq_ignore_ascii_case(&self.domain) {
            return Err(CatalogUriError::ForeignDomain {
                url: url.to_string(),
                domain: self.domain.clone(),
            });
        }

        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path.strip_prefix("track/") {
            Some(id) if is_valid_id(id) => Ok(CatalogUri {
                namespace: self.namespace.clone(),
                id: id.to_string(),
            }),
            _ => Err(CatalogUriError::MalformedUrl(url.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uri() {
        let uri = CatalogUri::parse("spotify:track:4uLU6hMCjMI75M1A2tKUQC").unwrap();
        assert_eq!(uri.namespace(), "spotify");
        assert_eq!(uri.id(), "4uLU6hMCjMI75M1A2tKUQC");
        assert_eq!(uri.to_string(), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
    }

    #[test]
    fn test_parse_rejects_other_kinds() {
        assert!(CatalogUri::parse("spotify:album:abc").is_err());
        assert!(CatalogUri::parse("spotify:track:").is_err());
        assert!(CatalogUri::parse(":track:abc").is_err());
        assert!(CatalogUri::parse("spotify:track:abc:extra").is_err());
    }

    #[test]
    fn test_uri_url_conversion_is_lossless() {
        let format = CatalogFormat::default();
        let uri = CatalogUri::parse("spotify:track:abc123").unwrap();

        let url = format.to_url(&uri);
        assert_eq!(url, "https://open.spotify.com/track/abc123");
        assert_eq!(format.from_url(&url).unwrap(), uri);
    }

    #[test]
    fn test_from_url_drops_share_token() {
        let format = CatalogFormat::default();
        let uri = format
            .from_url("https://open.spotify.com/track/abc123?si=deadbeef")
            .unwrap();
        assert_eq!(uri.to_string(), "spotify:track:abc123");
    }

    #[test]
    fn test_from_url_rejects_foreign_domain() {
        let format = CatalogFormat::default();
        let err = format.from_url("https://youtu.be/track/abc").unwrap_err();
        assert!(matches!(err, CatalogUriError::ForeignDomain { .. }));
    }

    #[test]
    fn test_from_url_rejects_non_track_path() {
        let format = CatalogFormat::default();
        assert!(format
            .from_url("https://open.spotify.com/playlist/abc")
            .is_err());
        assert!(format.from_url("http://open.spotify.com/track/abc").is_err());
    }
}
