use crate::error::Result;

use super::commands::{FilesCommand, GenerateArgs, GitHubReleaseCommand};
use crate::github::{ExecutionContext, HttpTransport, ReleaseClient, ReqwestTransport, TeeTransport};
use crate::provenance::config::{GenerationConfig, ReleaseConfig};
use crate::provenance::{FileSubjectResolver, ProvenanceGenerator, ReleaseAssetResolver};

use log::info;
use std::io;
use std::time::Duration;

fn generation_config(args: GenerateArgs) -> GenerationConfig {
    GenerationConfig {
        artifact: args.artifact_path,
        output_path: args.output_path,
        extra_materials: args.extra_materials,
        algorithms: args.digest_alg,
        format: args.format,
    }
}

pub fn handle_files_command(cmd: FilesCommand) -> Result<()> {
    let config = generation_config(cmd.generate);
    let context = ExecutionContext::from_env()?;

    let generator = ProvenanceGenerator::new(
        context,
        FileSubjectResolver::new(config.algorithms.clone()),
    );
    generator.generate_and_persist(&config)?;

    println!("Saved provenance to {}", config.output_path.display());
    Ok(())
}

pub fn handle_github_release_command(cmd: GitHubReleaseCommand) -> Result<()> {
    let config = generation_config(cmd.generate);

    let token = ReleaseConfig::token_from_lookup(|key| std::env::var(key).ok())?;
    let mut release = ReleaseConfig::new(cmd.tag_name, token);
    release.api_url = cmd.api_url;
    release.timeout = Duration::from_secs(cmd.timeout);
    release.trace_http = cmd.trace_http;

    let context = ExecutionContext::from_env()?;
    info!(
        "attesting asset {} of release {} in {}",
        config.artifact, release.tag_name, context.github.repository
    );

    let transport = ReqwestTransport::new(&release.token, release.timeout)?;
    let transport: Box<dyn HttpTransport> = if release.trace_http {
        Box::new(TeeTransport::new(transport, io::stderr()))
    } else {
        Box::new(transport)
    };

    let client = ReleaseClient::new(transport, &release.api_url, &context.github.repository)?;
    let resolver = ReleaseAssetResolver::new(
        client,
        release.tag_name.clone(),
        config.algorithms.clone(),
    );
    let generator = ProvenanceGenerator::new(context, resolver);
    generator.generate_and_persist(&config)?;

    println!("Saved provenance to {}", config.output_path.display());
    Ok(())
}
