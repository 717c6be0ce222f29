//! Error types for tiebafetch operations.
//!
//! This module defines the main error type [`TiebaError`] which represents
//! everything that can abort a topic walk, a reply-thread walk or a listing
//! fetch: transport failures, documents that no longer have the expected
//! shape, and bad caller input.
//!
//! # Example
//!
//! ```rust
//! use tiebafetch_core::{Result, TiebaError};
//!
//! fn check_range(start: u32, end: u32) -> Result<()> {
//!     if start > end {
//!         return Err(TiebaError::InvalidPageRange { start, end });
//!     }
//!     Ok(())
//! }
//! # assert!(check_range(3, 1).is_err());
//! ```

use thiserror::Error;

/// Main error type for fetching and extraction.
///
/// Transport errors abort the walk in progress. [`TiebaError::UnexpectedDocument`]
/// is reserved for markup that does not look the way the extractors expect,
/// so drift in the upstream pages is easy to tell apart from network trouble.
#[derive(Error, Debug)]
pub enum TiebaError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues and
    /// non-success status codes.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid base URL or request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The fetched page is missing a node or attribute the extractors rely on.
    #[error("Unexpected document shape: {0}")]
    UnexpectedDocument(String),

    /// A listing was requested with `start > end`.
    #[error("Invalid page range: start page {start} is after end page {end}")]
    InvalidPageRange { start: u32, end: u32 },

    /// JSON serialization failed.
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TiebaError {
    /// Shorthand for [`TiebaError::UnexpectedDocument`].
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        TiebaError::UnexpectedDocument(message.into())
    }
}

/// Result type alias for TiebaError.
pub type Result<T> = std::result::Result<T, TiebaError>;
