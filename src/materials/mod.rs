//! # Extra Materials
//!
//! Reads caller supplied material documents and turns them into validated
//! [`Material`] entries.
//!
//! A material document is a JSON array of `{uri, digest}` objects:
//!
//! ```json
//! [
//!   {
//!     "uri": "pkg:deb/debian/stunnel4@5.50-3?arch=amd64",
//!     "digest": { "sha256": "e1731ae217fcbc64d4c00d707dcead45c828c5f762bcf8cc56d87de511e096fa" }
//!   }
//! ]
//! ```
//!
//! Documents are read in the order given and their entries concatenated.
//! Nothing is de-duplicated.

use crate::error::{Error, Result};
use crate::hash::DigestSet;
use crate::slsa::Material;

use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Ordered build inputs. By convention the build's own source comes first.
pub type MaterialSet = Vec<Material>;

const MISSING_URI: &str = "empty or missing uri for material";
const MISSING_DIGEST: &str = "empty or missing digest for material";

#[derive(Debug, Deserialize)]
struct MaterialDescriptor {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    digest: Option<DigestSet>,
}

/// Why a single document could not be turned into materials.
#[derive(Debug)]
enum ReadFailure {
    Decode(serde_json::Error),
    Invalid(&'static str),
}

/// Reads and validates all descriptors from a single document.
///
/// `source` names the document in error messages.
///
/// # Errors
///
/// * [`Error::Parse`] if the document is not a JSON array of descriptors.
/// * [`Error::Validation`] for the first descriptor with an empty or missing
///   `uri` or `digest`.
pub fn read_materials<R: Read>(reader: R, source: &str) -> Result<MaterialSet> {
    decode_materials(reader).map_err(|failure| match failure {
        ReadFailure::Decode(e) => Error::Parse(format!(
            "failed retrieving extra materials for {source}: {e}"
        )),
        ReadFailure::Invalid(reason) => Error::Validation(format!(
            "failed retrieving extra materials for {source}: {reason}"
        )),
    })
}

/// Reads every document in `sources`, in order, and concatenates the result.
///
/// A document that cannot be opened yields an [`Error::Parse`] that does not
/// name the document; decode and validation failures do name it.
pub fn build_materials<P: AsRef<Path>>(sources: &[P]) -> Result<MaterialSet> {
    let mut materials = MaterialSet::new();

    for source in sources {
        let path = source.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Parse(format!("failed retrieving extra materials: {e}")))?;

        let read = read_materials(BufReader::new(file), &path.to_string_lossy())?;
        debug!(
            "read {} extra material(s) from {}",
            read.len(),
            path.display()
        );
        materials.extend(read);
    }

    Ok(materials)
}

fn decode_materials<R: Read>(reader: R) -> std::result::Result<MaterialSet, ReadFailure> {
    let descriptors: Vec<MaterialDescriptor> =
        serde_json::from_reader(reader).map_err(ReadFailure::Decode)?;

    descriptors
        .into_iter()
        .map(|d| {
            let uri = match d.uri {
                Some(uri) if !uri.is_empty() => uri,
                _ => return Err(ReadFailure::Invalid(MISSING_URI)),
            };
            let digest = match d.digest {
                Some(digest) if !digest.is_empty() => digest,
                _ => return Err(ReadFailure::Invalid(MISSING_DIGEST)),
            };
            Ok(Material { uri, digest })
        })
        .collect()
}
