//! # TuneBridge Match
//!
//! Title interpretation and match resolution engine. Turns noisy video titles
//! into (artist, track) pairs, builds catalog search queries from them, and
//! resolves each source item to a catalog track with paced searches.
//!
//! **Layout:**
//! - `models`: value objects (source items, extractions, outcomes, reports)
//! - `services`: normalization, extraction, query building, resolution
//! - `boundaries`: traits for the source feed, search, auth and playlist sink
//! - `clients`: HTTP implementations of those boundaries
//! - `tables`: CSV exports and imports
//! - `workflow`: migrate and import runs

pub mod boundaries;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod playlist;
pub mod services;
pub mod tables;
pub mod workflow;

pub use error::{RunError, RunResult, RunStage};
pub use models::{ExtractionResult, MatchOutcome, MatchReport, MatchStatus, SourceItem};
pub use services::{extract, MatchPipeline, MatchResolver, ResolverSettings};
