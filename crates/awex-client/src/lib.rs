//! Blocking HTTP client for the ActivityWatch REST API.
//!
//! The exporter talks to a locally running aw-server over plain HTTP:
//! - `GET /` on the daemon root serves as a liveness probe
//! - `GET /buckets` lists known buckets
//! - `GET /buckets/{id}/events?start=..&end=..[&limit=..]` fetches events
//!
//! All calls are sequential and blocking. There is deliberately no retry
//! or backoff; this backs an attended operator tool and every failure is
//! surfaced immediately.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use awex_core::{Event, TimeWindow};

/// Default aw-server API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5600/api/0";

/// Client errors, split so callers can tell connectivity problems from
/// bad upstream data.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to build the underlying HTTP client.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request could not be sent or timed out.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Metadata for one bucket from the listing endpoint.
///
/// aw-server reports more fields than these; only the ones the exporter
/// surfaces to the operator are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    pub id: String,
    pub kind: Option<String>,
    pub client: Option<String>,
    pub hostname: Option<String>,
}

impl BucketInfo {
    fn from_listing(id: String, meta: &Value) -> Self {
        let field = |name: &str| meta.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            kind: field("type"),
            client: field("client"),
            hostname: field("hostname"),
            id,
        }
    }
}

/// Blocking client for one aw-server instance.
#[derive(Debug, Clone)]
pub struct AwClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl AwClient {
    /// Creates a client for the given API root, e.g.
    /// `http://localhost:5600/api/0`. `timeout` bounds every request.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// The API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness probe against the daemon root: true iff it answers with
    /// a success status.
    ///
    /// Connection failures and timeouts yield `false` rather than an
    /// error so callers can print guidance instead of a backtrace. No
    /// other endpoint is touched.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        let url = self.root_url();
        match self.http.get(&url).send() {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(%url, error = %err, "liveness probe failed");
                false
            }
        }
    }

    /// Lists buckets known to the daemon, preserving listing order.
    pub fn buckets(&self) -> Result<Vec<BucketInfo>, ClientError> {
        let url = format!("{}/buckets", self.base_url);
        let response = self.get(&url, &[])?;
        let listing: serde_json::Map<String, Value> =
            response.json().map_err(|source| ClientError::Decode {
                url: url.clone(),
                source,
            })?;
        Ok(listing
            .iter()
            .map(|(id, meta)| BucketInfo::from_listing(id.clone(), meta))
            .collect())
    }

    /// Fetches events for one bucket within the window. Order is
    /// whatever the daemon returns; no client-side reordering.
    pub fn events(
        &self,
        bucket_id: &str,
        window: &TimeWindow,
        limit: Option<u32>,
    ) -> Result<Vec<Event>, ClientError> {
        let url = format!("{}/buckets/{}/events", self.base_url, bucket_id);
        let mut query = vec![
            ("start", window.start.to_rfc3339()),
            ("end", window.end.to_rfc3339()),
        ];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let response = self.get(&url, &query)?;
        response.json().map_err(|source| ClientError::Decode {
            url: url.clone(),
            source,
        })
    }

    /// Sends a GET and maps transport and status failures to typed errors.
    fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::blocking::Response, ClientError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .map_err(|source| ClientError::Request {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    /// The daemon root derived from the API base, for the liveness probe.
    fn root_url(&self) -> String {
        reqwest::Url::parse(&self.base_url)
            .ok()
            .and_then(|url| url.join("/").ok())
            .map_or_else(|| self.base_url.clone(), |root| root.to_string())
    }
}
