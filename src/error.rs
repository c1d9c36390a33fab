//! Error types for the per-project extraction pipeline.
//!
//! Every failure that can happen while processing a single project identifier
//! is represented by [`ScrapeError`]. These errors never abort a batch: the
//! driver catches them at the project boundary, logs them and moves on.

use thiserror::Error;

/// Errors raised while fetching or extracting data for one project.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("HTTP {status} while fetching {url}")]
    Status { url: String, status: u16 },

    /// An endpoint URL could not be built from the configured base URL
    #[error("invalid URL {0}")]
    InvalidUrl(String),

    /// The XML document could not be parsed
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element the page layout depends on was not found
    #[error("could not find {what} on {page}")]
    MissingElement { what: String, page: String },

    /// A value that should be numeric was not
    #[error("invalid number '{value}' in {context}")]
    InvalidNumber { value: String, context: String },

    /// A month string could not be parsed as a date
    #[error("invalid date '{0}'")]
    InvalidDate(String),
}

impl ScrapeError {
    pub(crate) fn missing(what: impl Into<String>, page: impl Into<String>) -> Self {
        Self::MissingElement {
            what: what.into(),
            page: page.into(),
        }
    }
}
