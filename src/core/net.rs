// src/core/net.rs
//
// HTTP(S) GET for the results endpoint (reqwest, blocking).
// Callers run this off the UI thread. Redirects are followed: Apps Script
// answers `/exec` with a 302 to googleusercontent.com.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::FetchError;

#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub user_agent: String,
    /// Honour HTTP(S)_PROXY from the environment
    pub use_system_proxy: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
            use_system_proxy: true,
        }
    }
}

/// Raw response body plus what we know about it.
#[derive(Clone, Debug, Default)]
pub struct Payload {
    pub text: String,
    /// Lowercased Content-Type header, if any
    pub content_type: Option<String>,
    pub status: u16,
}

/// Reusable client; cheap to clone (shares the connection pool).
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(&HttpSettings::default())
    }
}

impl HttpClient {
    pub fn new(settings: &HttpSettings) -> Self {
        let mut builder = Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .redirect(Policy::limited(10));
        if !settings.use_system_proxy {
            builder = builder.no_proxy();
        }
        let inner = builder.build().unwrap_or_else(|e| {
            loge!("Net: client build failed ({e}); falling back to defaults");
            Client::new()
        });
        Self { inner }
    }

    /// One GET. Any non-2xx status is a network failure; the body is decoded
    /// lossily so a stray byte never sinks the whole payload.
    pub fn get(&self, url: &str) -> Result<Payload, FetchError> {
        let resp = self
            .inner
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(describe(&e, url)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!("HTTP {} from {}", status, url)));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_ascii_lowercase());

        let bytes = resp
            .bytes()
            .map_err(|e| FetchError::Network(describe(&e, url)))?;

        Ok(Payload {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            content_type,
            status: status.as_u16(),
        })
    }
}

fn describe(err: &reqwest::Error, url: &str) -> String {
    let what = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "could not connect"
    } else if err.is_builder() {
        "invalid URL"
    } else if err.is_redirect() {
        "too many redirects"
    } else if err.is_body() || err.is_decode() {
        "failed while reading the response"
    } else {
        "request failed"
    };
    format!("{what} ({url}): {err}")
}
