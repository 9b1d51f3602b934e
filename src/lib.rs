pub mod checker;
pub mod config;
pub mod manifest;
pub mod mapper;
pub mod model;
pub mod output;
pub mod scan;

pub use checker::{OsvChecker, QueryError, VulnerabilityChecker};
pub use config::Config;
pub use manifest::{load_manifest, ManifestError};
pub use model::{OsvPackage, OsvVulnerability, QueryOutcome, QueryPayload, ScanReport};
pub use scan::run_scan;
