//! # GitHub Actions Integration
//!
//! Everything that knows about GitHub: the execution-context snapshot taken
//! from the runner environment, the functions deriving builder identity and
//! invocation from it, and the release API client used to fetch release
//! assets.
//!
//! The resolver functions here are pure. They never fail; a field missing
//! from the snapshot shows up as an empty string in the output.
//!
//! ## Examples
//!
//! ```
//! use slsa_provenance::github::{resolve_builder_id, ExecutionContext, HOSTED_ID_SUFFIX};
//!
//! let mut ctx = ExecutionContext::default();
//! ctx.github.repository = "org/repo".to_string();
//! ctx.runner.hosted = true;
//!
//! assert_eq!(
//!     resolve_builder_id(&ctx),
//!     format!("https://github.com/org/repo{HOSTED_ID_SUFFIX}")
//! );
//! ```

use crate::hash::DigestSet;
use crate::slsa::generators::{make_config_source, make_invocation, make_material};
use crate::slsa::{Invocation, InvocationEnvironment, Material};

pub mod context;
pub mod release;
pub mod transport;

pub use context::{ExecutionContext, GitHubContext, RunnerContext, TriggerEvent};
pub use release::{AssetFetcher, Release, ReleaseAsset, ReleaseClient};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TeeTransport};

/// Builder id suffix for workflows run on GitHub-hosted runners.
pub const HOSTED_ID_SUFFIX: &str = "/Attestations/GitHubHostedActions@v1";

/// Builder id suffix for workflows run on self-hosted runners.
pub const SELF_HOSTED_ID_SUFFIX: &str = "/Attestations/SelfHostedActions@v1";

const GITHUB_URL: &str = "https://github.com";

/// Digest algorithm of git commit ids.
const COMMIT_DIGEST_ALGORITHM: &str = "sha1";

/// Identity of the builder: the repository URL plus a suffix telling hosted
/// and self-hosted runners apart.
pub fn resolve_builder_id(ctx: &ExecutionContext) -> String {
    let suffix = if ctx.runner.hosted {
        HOSTED_ID_SUFFIX
    } else {
        SELF_HOSTED_ID_SUFFIX
    };
    format!("{GITHUB_URL}/{}{suffix}", ctx.github.repository)
}

/// How the build was started: workflow source, raw trigger inputs and runner.
pub fn resolve_invocation(ctx: &ExecutionContext) -> Invocation {
    make_invocation(
        make_config_source(&source_uri(ctx), source_digest(ctx), &ctx.github.workflow),
        ctx.github.event.inputs.clone(),
        InvocationEnvironment {
            arch: ctx.runner.arch.clone(),
            name: ctx.runner.name.clone(),
            os: ctx.runner.os.clone(),
        },
    )
}

/// The repository at the built commit, always the first material.
pub fn source_material(ctx: &ExecutionContext) -> Material {
    make_material(&source_uri(ctx), source_digest(ctx))
}

/// `<run id>-<run attempt>`, or whichever of the two is known.
pub fn resolve_invocation_id(ctx: &ExecutionContext) -> String {
    match (ctx.github.run_id.as_str(), ctx.github.run_attempt.as_str()) {
        ("", attempt) => attempt.to_string(),
        (run_id, "") => run_id.to_string(),
        (run_id, attempt) => format!("{run_id}-{attempt}"),
    }
}

fn source_uri(ctx: &ExecutionContext) -> String {
    format!("git+{GITHUB_URL}/{}", ctx.github.repository)
}

fn source_digest(ctx: &ExecutionContext) -> DigestSet {
    DigestSet::from([(COMMIT_DIGEST_ALGORITHM.to_string(), ctx.github.sha.clone())])
}
