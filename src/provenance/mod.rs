//! # Provenance Generation
//!
//! Assembles a complete SLSA provenance statement for one artifact:
//!
//! 1. the artifact is digested through a [`SubjectResolver`], either from the
//!    local filesystem ([`FileSubjectResolver`]) or from a GitHub release
//!    ([`ReleaseAssetResolver`]);
//! 2. the build's own source is recorded as the first material, followed by
//!    any extra material documents in the order given;
//! 3. builder identity and invocation are derived from the
//!    [`ExecutionContext`] snapshot.
//!
//! Any failure aborts generation; a partial statement is never returned.
//!
//! ## Examples
//!
//! ```no_run
//! use slsa_provenance::github::ExecutionContext;
//! use slsa_provenance::provenance::{FileSubjectResolver, ProvenanceGenerator};
//! use slsa_provenance::hash::HashAlgorithm;
//! use std::path::PathBuf;
//!
//! let context = ExecutionContext::from_env()?;
//! let generator = ProvenanceGenerator::new(
//!     context,
//!     FileSubjectResolver::new(vec![HashAlgorithm::Sha256]),
//! );
//!
//! let statement = generator.generate("bin/app", &[PathBuf::from("materials.json")])?;
//! assert_eq!(statement.subject[0].name, "app");
//! # Ok::<(), slsa_provenance::error::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::github::{self, AssetFetcher, ExecutionContext};
use crate::hash::{self, HashAlgorithm};
use crate::in_toto::{Statement, Subject, generate_statement_v01};
use crate::materials;
use crate::slsa::generators::{generate_predicate, make_builder, make_metadata};
use crate::slsa::{PREDICATE_TYPE_V02, Predicate};
use crate::storage;

use chrono::Utc;
use log::{debug, info, warn};
use std::path::Path;

pub mod config;

use config::GenerationConfig;

/// The statement type this crate produces.
pub type ProvenanceStatement = Statement<Predicate>;

/// Turns an artifact locator into the statement subject.
///
/// The two implementations interpret the locator differently: a filesystem
/// path for [`FileSubjectResolver`], a release asset name for
/// [`ReleaseAssetResolver`].
pub trait SubjectResolver {
    fn resolve_subject(&self, locator: &str) -> Result<Subject>;
}

/// Digests a local file. The subject is named after the file's base name.
#[derive(Debug, Clone, Default)]
pub struct FileSubjectResolver {
    algorithms: Vec<HashAlgorithm>,
}

impl FileSubjectResolver {
    pub fn new(algorithms: Vec<HashAlgorithm>) -> Self {
        Self { algorithms }
    }
}

impl SubjectResolver for FileSubjectResolver {
    fn resolve_subject(&self, locator: &str) -> Result<Subject> {
        let path = Path::new(locator);
        let digest = hash::calculate_file_digest(path, &self.algorithms)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| locator.to_string());

        debug!("digested {locator}: {digest:?}");
        Ok(Subject { name, digest })
    }
}

/// Streams a release asset through the digest engine without saving it.
pub struct ReleaseAssetResolver<F> {
    fetcher: F,
    tag: String,
    algorithms: Vec<HashAlgorithm>,
}

impl<F: AssetFetcher> ReleaseAssetResolver<F> {
    pub fn new(fetcher: F, tag: impl Into<String>, algorithms: Vec<HashAlgorithm>) -> Self {
        Self {
            fetcher,
            tag: tag.into(),
            algorithms,
        }
    }
}

impl<F: AssetFetcher> SubjectResolver for ReleaseAssetResolver<F> {
    fn resolve_subject(&self, locator: &str) -> Result<Subject> {
        let body = self.fetcher.fetch_asset(&self.tag, locator)?;
        let digest = hash::digest_reader(body, &self.algorithms).map_err(|e| match e {
            Error::Io(io) => Error::Transport(format!("failed reading asset {locator}: {io}")),
            other => other,
        })?;

        debug!("digested release asset {locator}@{}: {digest:?}", self.tag);
        Ok(Subject {
            name: locator.to_string(),
            digest,
        })
    }
}

/// Builds provenance statements for a fixed execution context.
pub struct ProvenanceGenerator<R> {
    context: ExecutionContext,
    resolver: R,
}

impl<R: SubjectResolver> ProvenanceGenerator<R> {
    pub fn new(context: ExecutionContext, resolver: R) -> Self {
        Self { context, resolver }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Generates the statement for `locator`.
    ///
    /// # Errors
    ///
    /// * [`Error::Generation`] wrapping the resolver failure if the artifact
    ///   cannot be found or fetched.
    /// * [`Error::Parse`] / [`Error::Validation`] from the extra material
    ///   documents.
    pub fn generate<P: AsRef<Path>>(
        &self,
        locator: &str,
        extra_materials: &[P],
    ) -> Result<ProvenanceStatement> {
        let ctx = &self.context;
        info!("generating provenance for {locator}");

        if ctx.github.repository.is_empty() || ctx.github.sha.is_empty() {
            warn!("repository or commit sha missing from context, provenance will be incomplete");
        }

        let subject = self
            .resolver
            .resolve_subject(locator)
            .map_err(Error::generation)?;

        let mut materials = vec![github::source_material(ctx)];
        materials.extend(materials::build_materials(extra_materials)?);
        debug!("collected {} material(s)", materials.len());

        let predicate = generate_predicate(
            make_builder(&github::resolve_builder_id(ctx)),
            github::resolve_invocation(ctx),
            make_metadata(&github::resolve_invocation_id(ctx), Some(Utc::now())),
            materials,
        );

        generate_statement_v01(vec![subject], PREDICATE_TYPE_V02, predicate)
    }

    /// Generates the statement described by `config` and writes it to
    /// `config.output_path`. Nothing is written if generation fails.
    pub fn generate_and_persist(&self, config: &GenerationConfig) -> Result<ProvenanceStatement> {
        let statement = self.generate(&config.artifact, &config.extra_materials)?;
        storage::persist(&statement, &config.output_path, config.format)?;
        Ok(statement)
    }
}
