//! # KeywordInsight Common Library
//!
//! Shared code for the KeywordInsight services including:
//! - Keyword, search history and waitlist models
//! - Common error types
//! - CSV export
//! - Configuration loading
//! - Timestamp utilities

pub mod config;
pub mod csv;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{CountryShare, Intent, Keyword, NewKeyword, SearchHistory};
