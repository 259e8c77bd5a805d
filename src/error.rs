//! Error types for profile extraction and page access

use thiserror::Error;

/// Failure of the page-query capability itself.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to fetch {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single profile could not be turned into a record.
///
/// Every variant aborts the current profile only; the driver logs it and moves on.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("required field missing: {0}")]
    MissingRequiredField(&'static str),

    #[error("malformed date range: {0:?}")]
    MalformedDateRange(String),

    #[error("name does not split into first and last: {0:?}")]
    InvalidName(String),

    #[error("unexpected layout in {block}: {span_count} text spans")]
    StructuralMismatch {
        block: &'static str,
        span_count: usize,
    },

    #[error("page query failed: {0}")]
    Page(#[from] PageError),
}
