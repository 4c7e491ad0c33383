//! Title interpretation and match resolution services
//!
//! Leaf-first:
//! - `title_normalizer`: strips promotional noise from raw titles
//! - `special_case_detector`: mixes, full albums and cover attributions
//! - `artist_track_extractor`: ordered pattern cascade → (artist, track)
//! - `query_builder`: (artist, track) → query candidates
//! - `match_resolver`: paced search over candidates for one item
//! - `match_pipeline`: batch resolution with per-worker pacing

pub mod artist_track_extractor;
pub mod match_pipeline;
pub mod match_resolver;
pub mod query_builder;
pub mod special_case_detector;
pub mod title_normalizer;
pub mod unmatched_analyzer;

pub use artist_track_extractor::{extract, TitleRule, TITLE_RULES};
pub use match_pipeline::MatchPipeline;
pub use match_resolver::{MatchResolver, ResolverSettings};
pub use special_case_detector::SpecialCase;
pub use unmatched_analyzer::{analyze_unmatched, UnmatchedPatterns};
