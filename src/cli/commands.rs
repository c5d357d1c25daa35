use crate::github::release::DEFAULT_API_URL;
use crate::hash::HashAlgorithm;
use crate::provenance::config::{DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS, OutputFormat};

use clap::Args;
use std::path::PathBuf;

/// Flags shared by every generation mode.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// The file or release asset to generate provenance for
    #[arg(long = "artifact-path")]
    pub artifact_path: String,

    /// The path to which the generated provenance should be written
    #[arg(long = "output-path", default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: PathBuf,

    /// JSON documents listing additional materials (comma-separated)
    #[arg(short = 'm', long = "extra-materials", value_delimiter = ',')]
    pub extra_materials: Vec<PathBuf>,

    /// Digest algorithms for the subject, comma-separated (sha256, sha384, sha512)
    #[arg(long = "digest-alg", value_delimiter = ',', default_value = "sha256")]
    pub digest_alg: Vec<HashAlgorithm>,

    /// Output format (statement, envelope)
    #[arg(long = "format", default_value = "statement")]
    pub format: OutputFormat,
}

/// Generate provenance on file assets
#[derive(Debug, Args)]
pub struct FilesCommand {
    #[command(flatten)]
    pub generate: GenerateArgs,
}

/// Generate provenance on GitHub release assets
#[derive(Debug, Args)]
pub struct GitHubReleaseCommand {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// The tag of the release holding the asset
    #[arg(long = "tag-name")]
    pub tag_name: String,

    /// GitHub REST API endpoint
    #[arg(long = "api-url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Mirror raw HTTP requests and responses to stderr
    #[arg(long = "trace-http")]
    pub trace_http: bool,
}
