use serde::{Deserialize, Serialize};

use super::{OsvVulnerability, QueryPayload};

/// Whether a query against OSV succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Ok,
    Error,
}

/// The recorded result of querying OSV for one mapped dependency.
///
/// Exactly one of `vulnerabilities` / `error` is present, matching `status`.
/// Outcomes are created once and never mutated; `unity_package` and
/// `unity_version` tie the outcome back to the manifest entry it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub status: QueryStatus,
    pub payload: QueryPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<Vec<OsvVulnerability>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub unity_package: String,
    pub unity_version: String,
}

impl QueryOutcome {
    pub fn ok(
        unity_package: impl Into<String>,
        unity_version: impl Into<String>,
        payload: QueryPayload,
        vulnerabilities: Vec<OsvVulnerability>,
    ) -> Self {
        Self {
            status: QueryStatus::Ok,
            payload,
            vulnerabilities: Some(vulnerabilities),
            error: None,
            unity_package: unity_package.into(),
            unity_version: unity_version.into(),
        }
    }

    pub fn error(
        unity_package: impl Into<String>,
        unity_version: impl Into<String>,
        payload: QueryPayload,
        error: impl Into<String>,
    ) -> Self {
        Self {
            status: QueryStatus::Error,
            payload,
            vulnerabilities: None,
            error: Some(error.into()),
            unity_package: unity_package.into(),
            unity_version: unity_version.into(),
        }
    }

    /// Number of vulnerabilities reported for this dependency.
    pub fn vulnerability_count(&self) -> usize {
        self.vulnerabilities.as_ref().map_or(0, Vec::len)
    }
}

/// Complete results of one scan run.
///
/// Every manifest dependency lands in exactly one of `results` (it was mapped
/// and queried) or `unsupported` (no OSV ecosystem mapping exists for it).
/// Both lists are ordered by manifest dependency name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub results: Vec<QueryOutcome>,
    pub unsupported: Vec<String>,
}

impl ScanReport {
    /// Total number of manifest dependencies covered by this report.
    pub fn dependency_count(&self) -> usize {
        self.results.len() + self.unsupported.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OsvPackage;

    fn payload() -> QueryPayload {
        QueryPayload::new(OsvPackage::new("Newtonsoft.Json", "NuGet"), "3.2.1")
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&QueryStatus::Ok).unwrap(), r#""ok""#);
        assert_eq!(serde_json::to_string(&QueryStatus::Error).unwrap(), r#""error""#);
    }

    #[test]
    fn test_ok_outcome_has_no_error_field() {
        let outcome = QueryOutcome::ok("com.unity.nuget.newtonsoft-json", "3.2.1", payload(), vec![]);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "ok");
        assert!(json.get("error").is_none());
        assert_eq!(json["vulnerabilities"], serde_json::json!([]));
        assert_eq!(json["unity_package"], "com.unity.nuget.newtonsoft-json");
        assert_eq!(json["unity_version"], "3.2.1");
        assert_eq!(json["payload"]["package"]["ecosystem"], "NuGet");
    }

    #[test]
    fn test_error_outcome_has_no_vulnerabilities_field() {
        let outcome = QueryOutcome::error(
            "com.unity.nuget.newtonsoft-json",
            "3.2.1",
            payload(),
            "HTTP 500 while querying OSV: Internal Server Error",
        );
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "error");
        assert!(json.get("vulnerabilities").is_none());
        assert_eq!(
            json["error"],
            "HTTP 500 while querying OSV: Internal Server Error"
        );
    }

    #[test]
    fn test_vulnerability_count() {
        let vuln: OsvVulnerability = serde_json::from_str(r#"{"id": "X"}"#).unwrap();
        let outcome = QueryOutcome::ok("pkg", "1.0.0", payload(), vec![vuln]);
        assert_eq!(outcome.vulnerability_count(), 1);

        let errored = QueryOutcome::error("pkg", "1.0.0", payload(), "boom");
        assert_eq!(errored.vulnerability_count(), 0);
    }

    #[test]
    fn test_dependency_count() {
        let report = ScanReport {
            results: vec![QueryOutcome::ok("a", "1", payload(), vec![])],
            unsupported: vec!["b".into(), "c".into()],
        };
        assert_eq!(report.dependency_count(), 3);
    }
}
