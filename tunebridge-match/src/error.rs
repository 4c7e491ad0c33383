//! Error types for tunebridge-match
//!
//! Stage-local errors (extraction, query building) cannot happen: those are
//! total functions. Search failures are caught per item and recorded as
//! `MatchStatus::Error`. Feed, auth, table and playlist failures abort the
//! run through [`RunError::BatchAbort`].

use std::fmt;
use thiserror::Error;

/// Search boundary failure (transport, auth expiry, malformed response)
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session unauthorized or expired")]
    Unauthorized,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Source feed failure
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Feed not configured: {0}")]
    NotConfigured(String),
}

/// Session acquisition failure
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No catalog credentials configured: {0}")]
    MissingCredentials(String),
}

/// Playlist sink failure
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Playlist not found: {0}")]
    NotFound(String),

    #[error("Session unauthorized or expired")]
    Unauthorized,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid playlist reference: {0}")]
    InvalidReference(String),
}

/// Tabular import/export failure
#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: {reason}")]
    BadRow { row: usize, reason: String },

    #[error("Unterminated quoted field")]
    UnterminatedQuote,
}

/// Pipeline stage, reported when a run aborts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    FetchSource,
    ExportSource,
    Authenticate,
    Match,
    ExportResults,
    Playlist,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::FetchSource => "fetch source playlist",
            RunStage::ExportSource => "export source tracks",
            RunStage::Authenticate => "authenticate with catalog",
            RunStage::Match => "match tracks",
            RunStage::ExportResults => "match results export",
            RunStage::Playlist => "playlist operations",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run-level failure
#[derive(Debug, Error)]
pub enum RunError {
    /// Continuing the run is meaningless; carries the last attempted stage
    #[error("Run aborted at stage '{stage}': {reason}")]
    BatchAbort { stage: RunStage, reason: String },
}

impl RunError {
    pub fn abort(stage: RunStage, reason: impl fmt::Display) -> Self {
        RunError::BatchAbort {
            stage,
            reason: reason.to_string(),
        }
    }

    pub fn stage(&self) -> RunStage {
        match self {
            RunError::BatchAbort { stage, .. } => *stage,
        }
    }
}

/// Result type for run-level operations
pub type RunResult<T> = Result<T, RunError>;
