use crate::error::{Error, Result};
use crate::github::release::DEFAULT_API_URL;
use crate::hash::HashAlgorithm;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use zeroize::Zeroizing;

pub const DEFAULT_OUTPUT_PATH: &str = "provenance.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Shape of the file written to the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The bare in-toto statement.
    #[default]
    Statement,
    /// The statement wrapped in an unsigned DSSE envelope.
    Envelope,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "statement" => Ok(OutputFormat::Statement),
            "envelope" => Ok(OutputFormat::Envelope),
            _ => Err(Error::Validation(format!(
                "Invalid output format '{s}'. Valid options are: statement, envelope"
            ))),
        }
    }
}

/// Options shared by both generation modes.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// File path in file mode, asset name in release mode.
    pub artifact: String,
    pub output_path: PathBuf,
    pub extra_materials: Vec<PathBuf>,
    pub algorithms: Vec<HashAlgorithm>,
    pub format: OutputFormat,
}

impl GenerationConfig {
    pub fn new(artifact: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            extra_materials: Vec::new(),
            algorithms: vec![HashAlgorithm::Sha256],
            format: OutputFormat::Statement,
        }
    }
}

/// Options only needed when attesting a GitHub release asset.
pub struct ReleaseConfig {
    pub tag_name: String,
    pub api_url: String,
    pub timeout: Duration,
    /// Mirror the raw HTTP exchange to stderr.
    pub trace_http: bool,
    pub token: Zeroizing<String>,
}

impl ReleaseConfig {
    /// Reads the API token with `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the token is unset or empty.
    pub fn token_from_lookup<F>(lookup: F) -> Result<Zeroizing<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(TOKEN_ENV_VAR) {
            Some(token) if !token.is_empty() => Ok(Zeroizing::new(token)),
            _ => Err(Error::Config(format!(
                "{TOKEN_ENV_VAR} environment variable not set"
            ))),
        }
    }

    pub fn new(tag_name: impl Into<String>, token: Zeroizing<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            trace_http: false,
            token,
        }
    }
}

impl std::fmt::Debug for ReleaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseConfig")
            .field("tag_name", &self.tag_name)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("trace_http", &self.trace_http)
            .field("token", &"<redacted>")
            .finish()
    }
}
