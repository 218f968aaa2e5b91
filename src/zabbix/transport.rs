//! HTTP leg of the JSON-RPC client

use crate::utils::{DigestError, Result};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Moves one JSON-RPC envelope to the server and returns the decoded reply.
pub trait Transport {
    fn post(&self, payload: &Value) -> Result<Value>;
}

/// Per-client connection settings, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub url: String,
    pub verify_ssl: bool,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            verify_ssl: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

pub struct HttpTransport {
    url: String,
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { url: config.url.clone(), http })
    }
}

impl Transport for HttpTransport {
    fn post(&self, payload: &Value) -> Result<Value> {
        let resp = self.http.post(&self.url).json(payload).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DigestError::Transport(format!("HTTP {} from {}", status, self.url)));
        }

        resp.json::<Value>()
            .map_err(|e| DigestError::Transport(format!("malformed JSON response: {}", e)))
    }
}
