//! # Hash Module
//!
//! Content digests for provenance subjects and materials. Supports SHA-256,
//! SHA-384 and SHA-512; SHA-256 is the default because it is the algorithm
//! every SLSA verifier understands.
//!
//! ## Features
//!
//! - Hash in-memory bytes with a single algorithm
//! - Stream any reader through several algorithms in one pass
//! - Hash files of arbitrary size without buffering them in memory
//!
//! ## Examples
//!
//! ```
//! use slsa_provenance::hash::{calculate_hash_with_algorithm, HashAlgorithm};
//!
//! let hash = calculate_hash_with_algorithm(b"Hello, World!", &HashAlgorithm::Sha256);
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! ```
//! use slsa_provenance::hash::{digest_reader, HashAlgorithm};
//!
//! let digests = digest_reader(
//!     &b"artifact bytes"[..],
//!     &[HashAlgorithm::Sha256, HashAlgorithm::Sha512],
//! ).unwrap();
//! assert_eq!(digests.len(), 2);
//! assert_eq!(digests["sha512"].len(), 128);
//! ```

use crate::error::{Error, Result};
use crate::utils::safe_open_file;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Mapping from algorithm name to lowercase hex digest.
///
/// A `BTreeMap` keeps serialized output ordered by algorithm name.
pub type DigestSet = BTreeMap<String, String>;

const READ_BUFFER_SIZE: usize = 8192;

/// Hash algorithms accepted for subject digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// The name used as a key in a [`DigestSet`].
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(Error::Validation(format!(
                "unsupported hash algorithm '{other}', valid options are: sha256, sha384, sha512"
            ))),
        }
    }
}

/// Calculate hash of data using the specified algorithm
///
/// # Examples
///
/// ```
/// use slsa_provenance::hash::{calculate_hash_with_algorithm, HashAlgorithm};
///
/// let data = b"Hello, World!";
/// let hash256 = calculate_hash_with_algorithm(data, &HashAlgorithm::Sha256);
/// let hash512 = calculate_hash_with_algorithm(data, &HashAlgorithm::Sha512);
///
/// assert_eq!(hash256.len(), 64);
/// assert_eq!(hash512.len(), 128);
/// ```
pub fn calculate_hash_with_algorithm(data: &[u8], algorithm: &HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
        HashAlgorithm::Sha384 => hex::encode(Sha384::digest(data)),
        HashAlgorithm::Sha512 => hex::encode(Sha512::digest(data)),
    }
}

/// Streams `reader` through every algorithm in `algorithms` in a single pass.
///
/// An empty `algorithms` slice falls back to SHA-256 so the resulting set is
/// never empty. Duplicate algorithms are hashed once.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails part way through. Callers that fetch
/// bytes over the network map this onto their own error kind.
pub fn digest_reader<R: Read>(mut reader: R, algorithms: &[HashAlgorithm]) -> Result<DigestSet> {
    let mut hashers = Hashers::new(algorithms);
    let mut buffer = [0; READ_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hashers.update(&buffer[..bytes_read]);
    }

    Ok(hashers.finalize())
}

/// Calculate the digest set of a file
///
/// The file is read in chunks, so arbitrarily large artifacts are hashed with
/// constant memory.
///
/// # Errors
///
/// * [`Error::NotFound`] if the path does not exist, is not a regular file or
///   cannot be read; the message carries the path as provided.
/// * [`Error::Io`] if reading fails after the file was opened.
///
/// # Examples
///
/// ```no_run
/// use slsa_provenance::hash::{calculate_file_digest, HashAlgorithm};
/// use std::path::Path;
///
/// let digests = calculate_file_digest(Path::new("bin/app"), &[HashAlgorithm::Sha256])?;
/// println!("sha256: {}", digests["sha256"]);
/// # Ok::<(), slsa_provenance::error::Error>(())
/// ```
pub fn calculate_file_digest(
    path: impl AsRef<Path>,
    algorithms: &[HashAlgorithm],
) -> Result<DigestSet> {
    let file = safe_open_file(path.as_ref())?;
    digest_reader(file, algorithms)
}

/// Running hash state for each requested algorithm.
struct Hashers {
    sha256: Option<Sha256>,
    sha384: Option<Sha384>,
    sha512: Option<Sha512>,
}

impl Hashers {
    fn new(algorithms: &[HashAlgorithm]) -> Self {
        let mut hashers = Hashers {
            sha256: None,
            sha384: None,
            sha512: None,
        };

        for algorithm in algorithms {
            match algorithm {
                HashAlgorithm::Sha256 => hashers.sha256 = Some(Sha256::new()),
                HashAlgorithm::Sha384 => hashers.sha384 = Some(Sha384::new()),
                HashAlgorithm::Sha512 => hashers.sha512 = Some(Sha512::new()),
            }
        }

        if algorithms.is_empty() {
            hashers.sha256 = Some(Sha256::new());
        }

        hashers
    }

    fn update(&mut self, chunk: &[u8]) {
        if let Some(h) = self.sha256.as_mut() {
            h.update(chunk);
        }
        if let Some(h) = self.sha384.as_mut() {
            h.update(chunk);
        }
        if let Some(h) = self.sha512.as_mut() {
            h.update(chunk);
        }
    }

    fn finalize(self) -> DigestSet {
        let mut set = DigestSet::new();
        if let Some(h) = self.sha256 {
            set.insert(
                HashAlgorithm::Sha256.as_str().to_string(),
                hex::encode(h.finalize()),
            );
        }
        if let Some(h) = self.sha384 {
            set.insert(
                HashAlgorithm::Sha384.as_str().to_string(),
                hex::encode(h.finalize()),
            );
        }
        if let Some(h) = self.sha512 {
            set.insert(
                HashAlgorithm::Sha512.as_str().to_string(),
                hex::encode(h.finalize()),
            );
        }
        set
    }
}
