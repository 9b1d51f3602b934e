//! Loading the Unity package manifest.
//!
//! Unity projects declare their package dependencies in
//! `Packages/manifest.json` as a `dependencies` object of name/version pairs.
//! A manifest that cannot be read or does not have that shape is fatal for the
//! whole run; there is nothing useful to scan without it.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("unable to open manifest at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest does not contain a 'dependencies' object")]
    MissingDependencies,
}

#[derive(Deserialize)]
struct UnityManifest {
    // Deserialized loosely: Unity writes string versions, but anything else in
    // here is coerced to its JSON text rather than rejected.
    dependencies: Option<serde_json::Value>,
}

/// Reads the manifest and returns its dependency name/version pairs.
///
/// The map is keyed by package name, so iteration order is sorted and the rest
/// of the run is deterministic regardless of manifest key order.
///
/// # Errors
///
/// Returns a [`ManifestError`] if the file cannot be read, is not valid JSON,
/// or has no `dependencies` object. All three are fatal to the run.
pub fn load_manifest(path: &Path) -> Result<BTreeMap<String, String>, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: UnityManifest =
        serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let dependencies = match manifest.dependencies {
        Some(serde_json::Value::Object(map)) => map,
        _ => return Err(ManifestError::MissingDependencies),
    };

    Ok(dependencies
        .into_iter()
        .map(|(name, version)| {
            let version = match version {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (name, version)
        })
        .collect())
}
