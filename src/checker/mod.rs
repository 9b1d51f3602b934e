mod osv;

pub use osv::{OsvChecker, OSV_QUERY_URL, QUERY_TIMEOUT};

use crate::model::{OsvVulnerability, QueryPayload};
use async_trait::async_trait;
use thiserror::Error;

/// Why a single OSV query failed.
///
/// Transport and protocol failures are tagged variants of one type so callers
/// handle them uniformly; both end up as an `error` outcome in the report, the
/// run continues either way.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// The request never produced a usable response: unreachable host,
    /// timeout, or a body that could not be read/decoded.
    #[error("Network error while querying OSV: {0}")]
    Transport(String),

    /// The remote answered with a non-2xx status.
    #[error("HTTP {status} while querying OSV: {reason}")]
    Protocol { status: u16, reason: String },
}

#[async_trait]
pub trait VulnerabilityChecker: Send + Sync {
    fn name(&self) -> &'static str;

    /// Queries the vulnerability database for one package.
    ///
    /// Returns the (possibly empty) vulnerability list on success. No retries.
    async fn query(&self, payload: &QueryPayload) -> Result<Vec<OsvVulnerability>, QueryError>;
}
