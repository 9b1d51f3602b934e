//! Scan orchestration: partition the manifest through the mapper, query every
//! mapped dependency, and assemble the report.
//!
//! Queries are independent and share no mutable state, so the concurrent path
//! only changes wall-clock time. Both paths assemble outcomes in sorted
//! manifest order, so the report and summary are byte-identical either way.

use crate::checker::VulnerabilityChecker;
use crate::mapper;
use crate::model::{QueryOutcome, QueryPayload, ScanReport};
use futures::future::join_all;
use std::collections::BTreeMap;
use tracing::debug;

/// Runs one scan over the manifest's dependencies.
///
/// Dependencies without an ecosystem mapping are collected as unsupported and
/// never queried; everything else produces exactly one [`QueryOutcome`].
pub async fn run_scan(
    dependencies: &BTreeMap<String, String>,
    checker: &dyn VulnerabilityChecker,
    parallel: bool,
) -> ScanReport {
    let mut mapped: Vec<(String, String, QueryPayload)> = Vec::new();
    let mut unsupported: Vec<String> = Vec::new();

    for (name, version) in dependencies {
        match mapper::map_package(name, version) {
            Some(payload) => mapped.push((name.clone(), version.clone(), payload)),
            None => unsupported.push(name.clone()),
        }
    }

    debug!(
        mapped = mapped.len(),
        unsupported = unsupported.len(),
        "partitioned manifest dependencies"
    );

    let results = if parallel {
        query_concurrent(mapped, checker).await
    } else {
        query_sequential(mapped, checker).await
    };

    ScanReport {
        results,
        unsupported,
    }
}

async fn query_one(
    checker: &dyn VulnerabilityChecker,
    name: String,
    version: String,
    payload: QueryPayload,
) -> QueryOutcome {
    match checker.query(&payload).await {
        Ok(vulns) => QueryOutcome::ok(name, version, payload, vulns),
        Err(err) => QueryOutcome::error(name, version, payload, err.to_string()),
    }
}

/// One query at a time, in manifest order.
async fn query_sequential(
    mapped: Vec<(String, String, QueryPayload)>,
    checker: &dyn VulnerabilityChecker,
) -> Vec<QueryOutcome> {
    let mut results = Vec::with_capacity(mapped.len());
    for (name, version, payload) in mapped {
        results.push(query_one(checker, name, version, payload).await);
    }
    results
}

/// All queries in flight at once. `join_all` yields results in input order,
/// which keeps the report deterministic regardless of completion order.
async fn query_concurrent(
    mapped: Vec<(String, String, QueryPayload)>,
    checker: &dyn VulnerabilityChecker,
) -> Vec<QueryOutcome> {
    join_all(
        mapped
            .into_iter()
            .map(|(name, version, payload)| query_one(checker, name, version, payload)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::QueryError;
    use crate::model::{OsvVulnerability, QueryStatus};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub checker that answers every query with the same canned result and
    /// counts how many queries it receives.
    struct StaticChecker {
        response: Result<Vec<OsvVulnerability>, QueryError>,
        calls: AtomicUsize,
    }

    impl StaticChecker {
        fn clean() -> Self {
            Self::with(Ok(Vec::new()))
        }

        fn with(response: Result<Vec<OsvVulnerability>, QueryError>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl VulnerabilityChecker for StaticChecker {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn query(
            &self,
            _payload: &QueryPayload,
        ) -> Result<Vec<OsvVulnerability>, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn manifest(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(name, version)| (name.to_string(), version.to_string()))
            .collect()
    }

    fn mixed_manifest() -> BTreeMap<String, String> {
        manifest(&[
            ("com.unity.nuget.newtonsoft-json", "3.2.1"),
            ("com.unity.textmeshpro", "3.0.6"),
            ("com.unity.ugui", "1.0.0"),
        ])
    }

    #[tokio::test]
    async fn test_every_dependency_lands_in_exactly_one_list() {
        let deps = mixed_manifest();
        let checker = StaticChecker::clean();

        let report = run_scan(&deps, &checker, false).await;

        assert_eq!(report.dependency_count(), deps.len());
        for name in deps.keys() {
            let in_results = report.results.iter().filter(|o| &o.unity_package == name).count();
            let in_unsupported = report.unsupported.iter().filter(|n| *n == name).count();
            assert_eq!(in_results + in_unsupported, 1, "{name} appears once");
        }
    }

    #[tokio::test]
    async fn test_mapped_dependency_is_queried_and_reported() {
        let deps = mixed_manifest();
        let checker = StaticChecker::clean();

        let report = run_scan(&deps, &checker, false).await;

        assert_eq!(checker.call_count(), 1);
        assert_eq!(report.results.len(), 1);
        let outcome = &report.results[0];
        assert_eq!(outcome.unity_package, "com.unity.nuget.newtonsoft-json");
        assert_eq!(outcome.unity_version, "3.2.1");
        assert_eq!(outcome.status, QueryStatus::Ok);
        assert_eq!(outcome.payload.package.name, "Newtonsoft.Json");
        assert_eq!(report.unsupported, ["com.unity.textmeshpro", "com.unity.ugui"]);
    }

    #[tokio::test]
    async fn test_unsupported_dependencies_trigger_no_queries() {
        let deps = manifest(&[
            ("com.unity.render-pipelines.universal", "14.0.8"),
            ("com.unity.textmeshpro", "3.0.6"),
        ]);
        let checker = StaticChecker::clean();

        let report = run_scan(&deps, &checker, true).await;

        assert_eq!(checker.call_count(), 0);
        assert!(report.results.is_empty());
        assert_eq!(report.unsupported.len(), 2);
    }

    #[tokio::test]
    async fn test_query_failure_is_recorded_not_propagated() {
        let deps = mixed_manifest();
        let checker = StaticChecker::with(Err(QueryError::Protocol {
            status: 500,
            reason: "Internal Server Error".to_string(),
        }));

        let report = run_scan(&deps, &checker, false).await;

        let outcome = &report.results[0];
        assert_eq!(outcome.status, QueryStatus::Error);
        assert!(outcome.error.as_ref().unwrap().contains("500"));
        assert!(outcome.vulnerabilities.is_none());
        // A failed query is still a result, never an unsupported entry.
        assert_eq!(report.unsupported, ["com.unity.textmeshpro", "com.unity.ugui"]);
    }

    #[tokio::test]
    async fn test_vulnerabilities_are_carried_through() {
        let vuln: OsvVulnerability = serde_json::from_str(r#"{"id": "X"}"#).unwrap();
        let deps = manifest(&[("com.unity.nuget.newtonsoft-json", "2.0.0")]);
        let checker = StaticChecker::with(Ok(vec![vuln]));

        let report = run_scan(&deps, &checker, false).await;

        let outcome = &report.results[0];
        assert_eq!(outcome.status, QueryStatus::Ok);
        assert_eq!(outcome.vulnerability_count(), 1);
        assert_eq!(outcome.vulnerabilities.as_ref().unwrap()[0].id, "X");
    }

    #[tokio::test]
    async fn test_sequential_and_concurrent_reports_match() {
        let deps = manifest(&[
            ("com.unity.nuget.mono-cecil", "1.11.4"),
            ("com.unity.nuget.newtonsoft-json", "3.2.1"),
            ("com.unity.timeline", "1.7.5"),
        ]);
        let checker = StaticChecker::clean();

        let sequential = run_scan(&deps, &checker, false).await;
        let concurrent = run_scan(&deps, &checker, true).await;

        assert_eq!(
            serde_json::to_value(&sequential).unwrap(),
            serde_json::to_value(&concurrent).unwrap()
        );

        // Both mapped packages, in sorted manifest order.
        let order: Vec<&str> = concurrent
            .results
            .iter()
            .map(|o| o.unity_package.as_str())
            .collect();
        assert_eq!(
            order,
            ["com.unity.nuget.mono-cecil", "com.unity.nuget.newtonsoft-json"]
        );
    }

    #[tokio::test]
    async fn test_empty_manifest_yields_empty_report() {
        let deps = BTreeMap::new();
        let checker = StaticChecker::clean();

        let report = run_scan(&deps, &checker, true).await;

        assert_eq!(report.dependency_count(), 0);
        assert_eq!(checker.call_count(), 0);
    }
}
