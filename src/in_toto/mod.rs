//! # in-toto Statement Model
//!
//! Types for the in-toto v0.1 Statement layer that binds a predicate (here:
//! SLSA provenance) to the artifacts it describes, plus an unsigned DSSE
//! envelope so the statement can be handed to an external signer.
//!
//! ## Examples
//!
//! ```
//! use slsa_provenance::in_toto::{generate_statement_v01, make_subject};
//!
//! let subject = make_subject("app.tar.gz", "sha256", "abc123");
//! let statement = generate_statement_v01(
//!     vec![subject],
//!     "https://example.com/predicate/v1",
//!     serde_json::json!({"key": "value"}),
//! ).unwrap();
//!
//! assert_eq!(statement.subject.len(), 1);
//! assert_eq!(statement.statement_type, "https://in-toto.io/Statement/v0.1");
//! ```

use crate::error::{Error, Result};
use crate::hash::DigestSet;

use serde::{Deserialize, Serialize};

pub mod dsse;

pub use dsse::Envelope;

/// Type URI for in-toto v0.1 statements.
pub const STATEMENT_TYPE_V01: &str = "https://in-toto.io/Statement/v0.1";

/// Payload type for DSSE envelopes carrying an in-toto statement.
pub const DSSE_PAYLOAD_TYPE: &str = "application/vnd.in-toto+json";

/// An artifact the statement is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub digest: DigestSet,
}

/// An in-toto statement binding `predicate` to `subject`.
///
/// Field order here is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement<P> {
    #[serde(rename = "_type")]
    pub statement_type: String,
    pub subject: Vec<Subject>,
    #[serde(rename = "predicateType")]
    pub predicate_type: String,
    pub predicate: P,
}

impl<P: Serialize> Statement<P> {
    /// Pretty printed JSON. Struct fields keep declaration order and every
    /// map is ordered, so equal statements always render byte-identically.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Compact JSON, used as the DSSE payload.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Creates a subject with a single digest entry.
pub fn make_subject(name: &str, alg: &str, digest: &str) -> Subject {
    Subject {
        name: name.to_string(),
        digest: DigestSet::from([(alg.to_string(), digest.to_string())]),
    }
}

/// Builds an in-toto v0.1 statement.
///
/// # Errors
///
/// Returns [`Error::Validation`] if there are no subjects, or if any subject
/// has an empty name or digest set.
pub fn generate_statement_v01<P>(
    subject: Vec<Subject>,
    predicate_type: &str,
    predicate: P,
) -> Result<Statement<P>> {
    if subject.is_empty() {
        return Err(Error::Validation(
            "in-toto statement requires at least one subject".to_string(),
        ));
    }

    for s in &subject {
        if s.name.is_empty() {
            return Err(Error::Validation("subject name cannot be empty".to_string()));
        }
        if s.digest.is_empty() {
            return Err(Error::Validation(format!(
                "subject '{}' has an empty digest",
                s.name
            )));
        }
    }

    Ok(Statement {
        statement_type: STATEMENT_TYPE_V01.to_string(),
        subject,
        predicate_type: predicate_type.to_string(),
        predicate,
    })
}
