//! Outbound client for the Insights Hub REST API.
//!
//! Every call forwards the caller's `Authorization` header verbatim; this
//! service never inspects or validates the token.

pub mod metrics;

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

pub const ASSETS_PATH: &str = "/api/assetmanagement/v3/assets";

#[derive(Debug)]
pub enum HubError {
    /// Upstream answered with a status the caller does not accept.
    Status { status: StatusCode, body: String },
    Timeout(Duration),
    Transport(String),
    /// Upstream answered successfully but the body is not JSON.
    Decode(String),
}

impl std::fmt::Display for HubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HubError::Status { status, .. } => write!(f, "HTTP {status}"),
            HubError::Timeout(t) => write!(f, "Request timed out after {}s", t.as_secs_f64()),
            HubError::Transport(msg) => write!(f, "Connection error: {msg}"),
            HubError::Decode(msg) => write!(f, "Invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for HubError {}

pub struct InsightsHubClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl InsightsHubClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build reqwest client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with `query`, returning the decoded JSON body on HTTP 200 only.
    pub async fn get_json<Q>(
        &self,
        path: &str,
        query: &Q,
        authorization: &str,
    ) -> Result<Value, HubError>
    where
        Q: serde::Serialize + ?Sized,
    {
        self.get(path, query, authorization, |status| status == StatusCode::OK)
            .await
    }

    /// Like [`get_json`](Self::get_json) but accepts any 2xx. An empty body decodes to `null`.
    pub async fn get_json_any_success<Q>(
        &self,
        path: &str,
        query: &Q,
        authorization: &str,
    ) -> Result<Value, HubError>
    where
        Q: serde::Serialize + ?Sized,
    {
        self.get(path, query, authorization, |status| status.is_success())
            .await
    }

    async fn get<Q>(
        &self,
        path: &str,
        query: &Q,
        authorization: &str,
        accept: fn(StatusCode) -> bool,
    ) -> Result<Value, HubError>
    where
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "Insights Hub request");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !accept(status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(HubError::Status { status, body });
        }

        let bytes = resp.bytes().await.map_err(|e| self.classify(e))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| HubError::Decode(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> HubError {
        if err.is_timeout() {
            HubError::Timeout(self.timeout)
        } else {
            HubError::Transport(err.to_string())
        }
    }
}
