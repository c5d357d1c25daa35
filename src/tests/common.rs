use crate::github::ExecutionContext;

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const SHA: &str = "849fb987efc0c0fc72e26a38f63f0c00225132be";

/// A snapshot of a hosted `workflow_dispatch` run of `org/repo`.
pub fn github_context() -> ExecutionContext {
    let mut ctx = ExecutionContext::default();
    ctx.github.repository = "org/repo".to_string();
    ctx.github.sha = SHA.to_string();
    ctx.github.workflow = "Integration".to_string();
    ctx.github.event_name = "workflow_dispatch".to_string();
    ctx.github.run_id = "1029384756".to_string();
    ctx.github.run_attempt = "2".to_string();
    ctx.github.event.inputs = serde_json::json!({ "release": "true" });
    ctx.runner.arch = "X64".to_string();
    ctx.runner.os = "Linux".to_string();
    ctx.runner.name = "GitHub Actions 2".to_string();
    ctx.runner.hosted = true;
    ctx
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}
