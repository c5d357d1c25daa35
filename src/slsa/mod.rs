//! # SLSA Provenance Predicate
//!
//! Types for the SLSA v0.2 provenance predicate produced for GitHub Actions
//! builds. A predicate records who built an artifact ([`Builder`]), how the
//! build was started ([`Invocation`]) and which inputs went into it
//! ([`Material`]).
//!
//! ## Key Components
//!
//! - [`generators`] - functions assembling the predicate parts
//! - [`PREDICATE_TYPE_V02`] - the predicate type URI placed in the statement
//! - [`BUILD_TYPE`] - the build type URI for GitHub Actions workflows
//!
//! ## Examples
//!
//! ```
//! use slsa_provenance::slsa::generators::{generate_predicate, make_builder, make_metadata};
//! use slsa_provenance::slsa::{Invocation, BUILD_TYPE};
//!
//! let predicate = generate_predicate(
//!     make_builder("https://github.com/org/repo/Attestations/GitHubHostedActions@v1"),
//!     Invocation::default(),
//!     make_metadata("", None),
//!     Vec::new(),
//! );
//! assert_eq!(predicate.build_type, BUILD_TYPE);
//! ```

use crate::hash::DigestSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod generators;

/// The SLSA v0.2 provenance predicate type URI.
///
/// ```
/// use slsa_provenance::slsa::PREDICATE_TYPE_V02;
///
/// assert_eq!(PREDICATE_TYPE_V02, "https://slsa.dev/provenance/v0.2");
/// ```
pub const PREDICATE_TYPE_V02: &str = "https://slsa.dev/provenance/v0.2";

/// URI describing a build driven by a GitHub Actions workflow. It fixes the
/// meaning of `invocation` and `materials`.
pub const BUILD_TYPE: &str = "https://github.com/Attestations/GitHubActionsWorkflow@v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predicate {
    pub builder: Builder,
    pub build_type: String,
    pub invocation: Invocation,
    pub metadata: Metadata,
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Builder {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub config_source: ConfigSource,
    /// Raw trigger-event inputs, passed through uninterpreted. Written as
    /// `null` when the trigger carried none.
    #[serde(default)]
    pub parameters: Value,
    pub environment: InvocationEnvironment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSource {
    pub uri: String,
    pub digest: DigestSet,
    pub entry_point: String,
}

/// Runner that executed the build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationEnvironment {
    pub arch: String,
    pub name: String,
    pub os: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_invocation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_finished_on: Option<String>,
    pub completeness: Completeness,
    pub reproducible: bool,
}

/// Which parts of the predicate claim to be complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completeness {
    pub parameters: bool,
    pub environment: bool,
    pub materials: bool,
}

/// A build input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub uri: String,
    pub digest: DigestSet,
}
