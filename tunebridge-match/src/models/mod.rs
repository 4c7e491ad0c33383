//! Data models for the title interpretation and match resolution engine
//!
//! All models are value objects owned by one pipeline run.

pub mod catalog_uri;
pub mod extraction;
pub mod match_outcome;
pub mod match_report;
pub mod source_item;

pub use catalog_uri::{CatalogFormat, CatalogUri, CatalogUriError};
pub use extraction::ExtractionResult;
pub use match_outcome::{MatchOutcome, MatchStatus, NO_QUERY};
pub use match_report::MatchReport;
pub use source_item::SourceItem;
