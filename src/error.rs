// src/error.rs
use thiserror::Error;

/// Why a fetch produced no records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No source URL yet. Not a real failure: the fetch is simply skipped.
    #[error("No data source configured")]
    Unconfigured,

    /// Transport or HTTP-level failure (status, timeout, DNS, refused connection).
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived but holds no usable header or rows.
    #[error("Empty or malformed data: {0}")]
    EmptyOrMalformed(String),
}

impl FetchError {
    /// True for the idle "nothing to fetch" state, which consumers must not
    /// present as an error.
    #[inline]
    pub fn is_idle(&self) -> bool { matches!(self, FetchError::Unconfigured) }

    /// Short heading for error banners.
    pub fn title(&self) -> &'static str {
        match self {
            FetchError::Unconfigured => "Not configured",
            FetchError::Network(_) => "Could not reach the results endpoint",
            FetchError::EmptyOrMalformed(_) => "Results could not be read",
        }
    }
}

/// Rejected data source transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("data source URL is empty")]
    EmptyUrl,

    #[error("data source already configured ({0}); reconfigure first")]
    AlreadyConfigured(String),

    #[error("data source is not configured")]
    NotConfigured,
}
