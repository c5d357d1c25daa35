//! # SLSA Provenance
//!
//! Generates SLSA v0.2 build provenance, wrapped in an in-toto v0.1
//! statement, for artifacts built by GitHub Actions workflows.
//!
//! An artifact is either a local file or an asset attached to a GitHub
//! release. The statement records the artifact's digest as its subject, the
//! builder identity and invocation derived from the workflow run, and the
//! build materials: the repository at the built commit plus any extra
//! materials supplied by the caller.
//!
//! ## Quick Start
//!
//! Inside a workflow step:
//! ```bash
//! slsa-provenance files \
//!     --artifact-path=bin/app \
//!     --output-path=provenance.json \
//!     --extra-materials=materials.json
//! ```
//!
//! For a release asset (requires `GITHUB_TOKEN`):
//! ```bash
//! slsa-provenance github-release \
//!     --tag-name=v1.2.3 \
//!     --artifact-path=app-linux-amd64.tar.gz
//! ```

pub mod cli;
pub mod error;
pub mod github;
pub mod hash;
pub mod in_toto;
pub mod materials;
pub mod provenance;
pub mod slsa;
pub mod storage;
#[cfg(test)]
mod tests;
pub mod utils;

// Re-export error types
pub use error::{Error, Result};

/// Initialize logging for the CLI
///
/// Log output is controlled through `RUST_LOG`.
///
/// # Examples
///
/// ```
/// use slsa_provenance::init_logging;
///
/// // Note: This might fail if already initialized
/// let result = init_logging();
/// assert!(result.is_ok() || result.is_err());
/// ```
pub fn init_logging() -> Result<()> {
    env_logger::try_init().map_err(|e| Error::InitializationError(e.to_string()))
}

// Re-export commonly used types and traits
pub use github::ExecutionContext;
pub use provenance::{ProvenanceGenerator, ProvenanceStatement, SubjectResolver};
