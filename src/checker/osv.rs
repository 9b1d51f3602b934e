use super::{QueryError, VulnerabilityChecker};
use crate::model::{OsvPackage, OsvVulnerability, QueryPayload};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// The OSV single-package query endpoint.
pub const OSV_QUERY_URL: &str = "https://api.osv.dev/v1/query";

/// Per-request timeout. A slow remote stalls the run at most this long per
/// dependency; there is no retry and no cancellation beyond it.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(15);

pub struct OsvChecker {
    client: reqwest::Client,
    endpoint: String,
}

impl OsvChecker {
    pub fn new() -> Result<Self> {
        Self::with_timeout(QUERY_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: OSV_QUERY_URL.to_string(),
        })
    }

    /// Points the checker at a different query endpoint. Used by tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Wire format of the query request. Only the package identity is sent; the
/// Unity wrapper version in the payload is report metadata OSV cannot use.
#[derive(Serialize)]
struct OsvQueryRequest<'a> {
    package: &'a OsvPackage,
}

#[derive(Deserialize)]
struct OsvQueryResponse {
    vulns: Option<Vec<OsvVulnerability>>,
}

/// Digs out the innermost cause of a reqwest error. The top-level display is
/// usually "error sending request for url ..."; the root cause carries the
/// actual network failure ("Connection refused", "operation timed out", ...).
fn transport_reason(err: &reqwest::Error) -> String {
    let mut reason = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        reason = cause.to_string();
        source = cause.source();
    }
    reason
}

#[async_trait]
impl VulnerabilityChecker for OsvChecker {
    fn name(&self) -> &'static str {
        "OSV.dev"
    }

    async fn query(&self, payload: &QueryPayload) -> Result<Vec<OsvVulnerability>, QueryError> {
        debug!(
            package = %payload.package.name,
            ecosystem = %payload.package.ecosystem,
            "querying OSV"
        );

        let request = OsvQueryRequest {
            package: &payload.package,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| QueryError::Transport(transport_reason(&e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(package = %payload.package.name, %status, "OSV rejected the query");
            return Err(QueryError::Protocol {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unrecognized status")
                    .to_string(),
            });
        }

        // A 2xx response whose body cannot be decoded never produced a usable
        // answer, so it classifies as a transport failure.
        let body: OsvQueryResponse = response
            .json()
            .await
            .map_err(|e| QueryError::Transport(transport_reason(&e)))?;

        Ok(body.vulns.unwrap_or_default())
    }
}
