use serde::{Deserialize, Serialize};

/// A package identity as understood by the OSV API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsvPackage {
    pub name: String,
    pub ecosystem: String,
}

impl OsvPackage {
    pub fn new(name: impl Into<String>, ecosystem: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ecosystem: ecosystem.into(),
        }
    }
}

/// The payload built for one mapped dependency.
///
/// `package` is what gets sent to OSV. `package_version` is the Unity wrapper
/// version from the manifest; OSV knows nothing about it, so it is carried only
/// as metadata for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    pub package: OsvPackage,
    pub package_version: String,
}

impl QueryPayload {
    pub fn new(package: OsvPackage, package_version: impl Into<String>) -> Self {
        Self {
            package,
            package_version: package_version.into(),
        }
    }
}
