//! # TuneBridge Common Library
//!
//! Shared code for the TuneBridge binaries including:
//! - Error types
//! - Bootstrap TOML configuration and config file resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
