//! Error types for audit operations.
//!
//! This module defines the main error type [`AuditError`] which represents
//! every failure a check, a metric or the sitemap serializer can surface.
//! A BAD verdict is never an error: it is a [`CheckResult`](crate::CheckResult)
//! with [`Status::Bad`](crate::Status::Bad).
//!
//! # Example
//!
//! ```rust
//! use seoaudit_core::{AuditError, check_readability};
//!
//! match check_readability("", "en_US") {
//!     Err(AuditError::EmptyInput) => println!("nothing to score"),
//!     Err(e) => println!("Error: {}", e),
//!     Ok(score) => println!("Score: {:.1}", score),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for audit, metric and sitemap operations.
#[derive(Error, Debug)]
pub enum AuditError {
    /// No syllable rule table is registered for the language code.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A registered rule table could not be loaded.
    #[error("Failed to load syllable rules for {language}: {message}")]
    RuleTable { language: String, message: String },

    /// The readability formula needs at least one word and one sentence.
    #[error("Input contains no words or no sentences")]
    EmptyInput,

    /// Network or transport failure while fetching a URL.
    ///
    /// Distinct from a non-200 response, which is a BAD check result.
    #[cfg(feature = "fetch")]
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request to {url} timed out after {timeout} seconds")]
    Timeout { url: String, timeout: u64 },

    /// Invalid or unresolvable URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A required singleton element is absent from the document.
    #[error("Missing required element: <{0}>")]
    MissingElement(String),

    /// Sitemap entry rejected before serialization.
    #[error("Invalid sitemap entry: {0}")]
    InvalidEntry(String),

    /// HTML query errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// JSON or XML serialization errors.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl AuditError {
    /// Returns `true` for transport-level failures (including timeouts).
    ///
    /// Callers use this to decide whether to retry, skip or abort.
    pub fn is_fetch_error(&self) -> bool {
        match self {
            #[cfg(feature = "fetch")]
            AuditError::Fetch { .. } => true,
            AuditError::Timeout { .. } => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialization(err.to_string())
    }
}

/// Result type alias for AuditError.
pub type Result<T> = std::result::Result<T, AuditError>;
