use crate::model::{QueryOutcome, QueryStatus, ScanReport};
use std::path::Path;

/// One stdout line per queried dependency.
fn summary_line(outcome: &QueryOutcome) -> String {
    match outcome.status {
        QueryStatus::Error => format!(
            "- {}: unable to query OSV ({})",
            outcome.unity_package,
            outcome.error.as_deref().unwrap_or("unknown error")
        ),
        QueryStatus::Ok if outcome.vulnerability_count() > 0 => format!(
            "- {}: vulnerabilities found ({} entries)",
            outcome.unity_package,
            outcome.vulnerability_count()
        ),
        QueryStatus::Ok => format!(
            "- {}: no vulnerabilities reported by OSV",
            outcome.unity_package
        ),
    }
}

/// Prints the human-readable run summary to stdout.
pub fn print_summary(report: &ScanReport, report_path: &Path) {
    println!("Completed OSV scan attempt.");

    if report.results.is_empty() {
        println!("- No packages were eligible for OSV scanning.");
    } else {
        for outcome in &report.results {
            println!("{}", summary_line(outcome));
        }
    }

    if !report.unsupported.is_empty() {
        println!();
        println!("The following packages do not have a supported OSV ecosystem mapping:");
        for package in &report.unsupported {
            println!("  - {}", package);
        }
    }

    println!();
    println!("Detailed results written to {}", report_path.display());
}
