//! HTTP transport boundary
//!
//! The entity core talks to the remote API exclusively through the
//! [`Transport`] trait: blocking verbs returning decoded JSON. Production
//! code uses [`HttpTransport`]; tests substitute an in-memory fake.

use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Blocking JSON transport against constructed URLs
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, TransportError>;
    fn put(&self, url: &str, body: &Value) -> Result<Value, TransportError>;
}

/// Errors raised by the transport layer
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to construct HTTP client: {0}")]
    Init(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// One page of a collection response
#[derive(Debug, Deserialize)]
pub struct ListPage {
    pub rows: Vec<Value>,
    pub meta: CollectionMeta,
}

/// Collection-level metadata reported by the server
#[derive(Debug, Deserialize)]
pub struct CollectionMeta {
    /// Total row count of the whole logical result set, not of this page
    pub size: u64,
}

impl ListPage {
    pub fn from_value(url: &str, raw: Value) -> Result<Self, TransportError> {
        serde_json::from_value(raw).map_err(|e| TransportError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Production transport over HTTP basic auth
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    login: String,
    password: String,
}

impl HttpTransport {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(TransportError::Init)?;
        Ok(Self {
            client,
            login: login.into(),
            password: password.into(),
        })
    }

    fn check_status(
        url: &str,
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(TransportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, TransportError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .basic_auth(&self.login, Some(&self.password))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|source| TransportError::Http {
                url: url.to_string(),
                source,
            })?;
        let response = Self::check_status(url, response)?;
        response.json().map_err(|e| TransportError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn put(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        debug!(url, "PUT");
        let response = self
            .client
            .put(url)
            .basic_auth(&self.login, Some(&self.password))
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .map_err(|source| TransportError::Http {
                url: url.to_string(),
                source,
            })?;
        let response = Self::check_status(url, response)?;
        response.json().map_err(|e| TransportError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
