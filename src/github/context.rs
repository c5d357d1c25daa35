use crate::error::{Error, Result};

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::fs;

/// Snapshot of the workflow run, taken once at process start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
    pub github: GitHubContext,
    pub runner: RunnerContext,
}

/// Values GitHub sets for the job (`GITHUB_*`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GitHubContext {
    pub action: String,
    pub actions: bool,
    pub action_path: String,
    pub actor: String,
    pub base_ref: String,
    pub event: TriggerEvent,
    pub event_name: String,
    pub event_path: String,
    pub head_ref: String,
    pub job: String,
    pub git_ref: String,
    pub repository: String,
    pub run_id: String,
    pub run_number: String,
    pub run_attempt: String,
    pub sha: String,
    pub workflow: String,
}

/// The runner executing the job (`RUNNER_*`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunnerContext {
    pub arch: String,
    pub name: String,
    pub os: String,
    pub temp: String,
    pub tool_cache: String,
    /// `true` for GitHub-hosted runners, `false` for self-hosted ones.
    pub hosted: bool,
}

/// The part of the trigger-event document we carry into provenance.
///
/// Only `workflow_dispatch` events have dynamic inputs; for every other event
/// `inputs` is absent and decodes to `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TriggerEvent {
    #[serde(default)]
    pub inputs: Value,
}

impl TriggerEvent {
    /// Parses a trigger-event document.
    pub fn from_slice(bytes: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl ExecutionContext {
    /// Builds the snapshot from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the snapshot from `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `GITHUB_EVENT_PATH` is unset or the
    /// document it points to cannot be read or parsed. Every other missing
    /// variable resolves to an empty string.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();

        let event_path = var("GITHUB_EVENT_PATH");
        let event = load_event(&event_path)?;

        let actions = var("GITHUB_ACTIONS") == "true";
        let hosted = match var("RUNNER_ENVIRONMENT").as_str() {
            "github-hosted" => true,
            "self-hosted" => false,
            _ => actions,
        };

        Ok(Self {
            github: GitHubContext {
                action: var("GITHUB_ACTION"),
                actions,
                action_path: var("GITHUB_ACTION_PATH"),
                actor: var("GITHUB_ACTOR"),
                base_ref: var("GITHUB_BASE_REF"),
                event,
                event_name: var("GITHUB_EVENT_NAME"),
                event_path,
                head_ref: var("GITHUB_HEAD_REF"),
                job: var("GITHUB_JOB"),
                git_ref: var("GITHUB_REF"),
                repository: var("GITHUB_REPOSITORY"),
                run_id: var("GITHUB_RUN_ID"),
                run_number: var("GITHUB_RUN_NUMBER"),
                run_attempt: var("GITHUB_RUN_ATTEMPT"),
                sha: var("GITHUB_SHA"),
                workflow: var("GITHUB_WORKFLOW"),
            },
            runner: RunnerContext {
                arch: var("RUNNER_ARCH"),
                name: var("RUNNER_NAME"),
                os: var("RUNNER_OS"),
                temp: var("RUNNER_TEMP"),
                tool_cache: var("RUNNER_TOOL_CACHE"),
                hosted,
            },
        })
    }
}

fn load_event(path: &str) -> Result<TriggerEvent> {
    if path.is_empty() {
        return Err(Error::Config(
            "GITHUB_EVENT_PATH environment variable not set".to_string(),
        ));
    }

    let bytes = fs::read(path)
        .map_err(|e| Error::Config(format!("failed reading trigger event {path}: {e}")))?;
    let event = TriggerEvent::from_slice(&bytes)
        .map_err(|e| Error::Config(format!("failed parsing trigger event {path}: {e}")))?;

    debug!("loaded trigger event from {path}");
    Ok(event)
}
