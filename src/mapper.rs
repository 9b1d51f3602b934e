//! Mapping from Unity package names to OSV package identities.
//!
//! OSV has no Unity ecosystem. The only packages we can query are the ones
//! Unity distributes as wrappers around packages that do live in a supported
//! ecosystem, so the mapping is a small static table keyed by the exact Unity
//! package name. Anything not in the table is unsupported and must not be sent
//! to the API.

use crate::model::{OsvPackage, QueryPayload};

/// The OSV identity a Unity package maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageOverride {
    pub ecosystem: &'static str,
    pub name: &'static str,
}

/// Unity packages with a known OSV ecosystem mapping.
///
/// Exact string match only; no fuzzy matching, no version-range resolution.
pub const PACKAGE_OVERRIDES: &[(&str, PackageOverride)] = &[
    (
        "com.unity.nuget.mono-cecil",
        PackageOverride {
            ecosystem: "NuGet",
            name: "Mono.Cecil",
        },
    ),
    (
        "com.unity.nuget.newtonsoft-json",
        PackageOverride {
            ecosystem: "NuGet",
            name: "Newtonsoft.Json",
        },
    ),
];

/// Looks up the override table for `name`.
pub fn override_for(name: &str) -> Option<PackageOverride> {
    PACKAGE_OVERRIDES
        .iter()
        .find(|(unity_name, _)| *unity_name == name)
        .map(|(_, mapping)| *mapping)
}

/// Builds the query payload for one manifest dependency.
///
/// Returns `None` when the package has no OSV mapping; the caller records it
/// as unsupported and performs no network call. The Unity wrapper version is
/// carried in the payload as report metadata only.
pub fn map_package(name: &str, version: &str) -> Option<QueryPayload> {
    let mapping = override_for(name)?;
    Some(QueryPayload::new(
        OsvPackage::new(mapping.name, mapping.ecosystem),
        version,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_package_maps() {
        let payload = map_package("com.unity.nuget.newtonsoft-json", "3.2.1").unwrap();
        assert_eq!(payload.package.name, "Newtonsoft.Json");
        assert_eq!(payload.package.ecosystem, "NuGet");
        assert_eq!(payload.package_version, "3.2.1");
    }

    #[test]
    fn test_unknown_package_does_not_map() {
        assert!(map_package("com.unity.textmeshpro", "3.0.6").is_none());
        assert!(map_package("com.unity.render-pipelines.universal", "14.0.8").is_none());
    }

    #[test]
    fn test_match_is_exact() {
        // Neither prefixes nor case variants match.
        assert!(map_package("com.unity.nuget.newtonsoft-json.extras", "1.0.0").is_none());
        assert!(map_package("com.unity.nuget.Newtonsoft-Json", "3.2.1").is_none());
        assert!(map_package("newtonsoft-json", "3.2.1").is_none());
    }

    #[test]
    fn test_table_is_sorted_and_unique() {
        let names: Vec<&str> = PACKAGE_OVERRIDES.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }
}
