use clap::{Parser, Subcommand};
use slsa_provenance::{
    cli::{self, FilesCommand, GitHubReleaseCommand},
    error::Result,
};

#[derive(Parser)]
#[command(name = cli::CLI_NAME, author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate provenance on file assets
    Files(FilesCommand),
    /// Generate provenance on GitHub release assets
    GithubRelease(GitHubReleaseCommand),
}

fn main() -> Result<()> {
    // Initialize logging
    slsa_provenance::init_logging()?;

    // Parse command line arguments
    let cli = Cli::parse();

    // Handle commands
    let result = match cli.command {
        Commands::Files(command) => cli::handle_files_command(command),
        Commands::GithubRelease(command) => cli::handle_github_release_command(command),
    };

    // Format and display any errors
    if let Err(ref e) = result {
        eprintln!("{}", cli::format_error(e));
    }

    result
}
