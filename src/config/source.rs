// src/config/source.rs
//
// Data source state. Two states, two transitions:
//   Unconfigured --configure(url)--> Configured(url)
//   Configured   --reconfigure()--> Unconfigured
// Everything else is rejected.

use crate::error::SourceError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SourceConfig {
    #[default]
    Unconfigured,
    Configured(String),
}

impl SourceConfig {
    /// Submit a URL. Surrounding whitespace is dropped; empty input is refused.
    pub fn configure(&mut self, url: &str) -> Result<(), SourceError> {
        if let SourceConfig::Configured(current) = self {
            return Err(SourceError::AlreadyConfigured(current.clone()));
        }
        let url = url.trim();
        if url.is_empty() {
            return Err(SourceError::EmptyUrl);
        }
        logf!("Source: configured {}", url);
        *self = SourceConfig::Configured(s!(url));
        Ok(())
    }

    pub fn reconfigure(&mut self) -> Result<(), SourceError> {
        match self {
            SourceConfig::Unconfigured => Err(SourceError::NotConfigured),
            SourceConfig::Configured(url) => {
                logf!("Source: released {}", url);
                *self = SourceConfig::Unconfigured;
                Ok(())
            }
        }
    }

    #[inline]
    pub fn is_configured(&self) -> bool { matches!(self, SourceConfig::Configured(_)) }

    /// Empty string while unconfigured, which the fetch layer treats as idle.
    pub fn url(&self) -> &str {
        match self {
            SourceConfig::Unconfigured => "",
            SourceConfig::Configured(url) => url,
        }
    }
}
