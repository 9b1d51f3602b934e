use crate::model::ScanReport;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Persists the report as indented JSON.
///
/// Any prior report at `path` is replaced wholesale; there is no merge and no
/// backup. The parent directory is created if it does not exist yet.
pub fn write_report(path: &Path, report: &ScanReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("unable to create {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("unable to write report to {}", path.display()))
}
