pub mod commands;
pub mod handlers;
use crate::error::Error;

// Re-export commonly used items
pub use commands::{FilesCommand, GitHubReleaseCommand};
pub use handlers::{handle_files_command, handle_github_release_command};

pub const CLI_NAME: &str = "slsa-provenance";

pub fn format_error(error: &Error) -> String {
    match error {
        Error::Config(msg) => format!("Configuration error: {msg}"),
        Error::NotFound(_) => format!("Not found: {error}"),
        Error::Parse(msg) => format!("Parse error: {msg}"),
        Error::Validation(msg) => format!("Validation error: {msg}"),
        Error::Transport(msg) => format!("Transport error: {msg}"),
        Error::Io(err) => format!("IO error: {err}"),
        Error::Generation(_) => format!("Generation error: {error}"),
        Error::Serialization(msg) => format!("Serialization error: {msg}"),
        Error::Json(err) => format!("JSON error: {err}"),
        Error::InitializationError(msg) => format!("Initialization error: {msg}"),
    }
}
