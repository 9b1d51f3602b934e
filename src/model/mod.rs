//! Core data types for packages, query outcomes, and scan reports.
//!
//! This module contains the fundamental types used throughout unityscan:
//!
//! - [`OsvPackage`] - A package identity in OSV terms (name + ecosystem)
//! - [`QueryPayload`] - What we query OSV with, plus the Unity version as metadata
//! - [`OsvVulnerability`] - A vulnerability entry as returned by OSV
//! - [`QueryOutcome`] - The result of querying one mapped dependency
//! - [`ScanReport`] - Complete scan results, written to disk as JSON
//!
//! # Example
//!
//! ```
//! use unityscan::model::{OsvPackage, QueryPayload};
//!
//! let payload = QueryPayload::new(
//!     OsvPackage::new("Newtonsoft.Json", "NuGet"),
//!     "3.2.1",
//! );
//!
//! assert_eq!(payload.package.ecosystem, "NuGet");
//! ```

mod package;
mod report;
mod vulnerability;

pub use package::*;
pub use report::*;
pub use vulnerability::*;
