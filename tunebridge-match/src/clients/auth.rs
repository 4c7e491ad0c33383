//! Static-token session provider
//!
//! Hands out a session built from a pre-acquired bearer token. Obtaining or
//! refreshing OAuth tokens happens outside this program.

use crate::boundaries::{AuthProvider, CatalogSession};
use crate::error::AuthError;
use async_trait::async_trait;

/// Session provider backed by a configured access token
pub struct StaticTokenAuth {
    token: Option<String>,
}

impl StaticTokenAuth {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn session(&self) -> Result<CatalogSession, AuthError> {
        match self.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => {
                tracing::info!("Using configured catalog access token");
                Ok(CatalogSession::new(token))
            }
            _ => Err(AuthError::MissingCredentials(
                "set TUNEBRIDGE_SPOTIFY_TOKEN or spotify_access_token in the config file"
                    .to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_token() {
        let auth = StaticTokenAuth::new(Some(" token ".to_string()));
        let session = auth.session().await.unwrap();
        assert_eq!(session.access_token(), "token");
    }

    #[tokio::test]
    async fn test_missing_or_blank_token() {
        assert!(StaticTokenAuth::new(None).session().await.is_err());
        assert!(StaticTokenAuth::new(Some("  ".into())).session().await.is_err());
    }
}
