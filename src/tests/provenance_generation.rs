use crate::error::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::in_toto::{DSSE_PAYLOAD_TYPE, STATEMENT_TYPE_V01};
use crate::provenance::config::{GenerationConfig, OutputFormat};
use crate::github::ExecutionContext;
use crate::provenance::{FileSubjectResolver, ProvenanceGenerator};
use crate::slsa::{BUILD_TYPE, PREDICATE_TYPE_V02};
use crate::tests::common::{SHA, github_context, read_json, write_file};

use serde_json::{Value, json};
use std::fs;
use tempfile::tempdir;

fn file_generator(algorithms: Vec<HashAlgorithm>) -> ProvenanceGenerator<FileSubjectResolver> {
    ProvenanceGenerator::new(github_context(), FileSubjectResolver::new(algorithms))
}

#[test]
fn test_files_mode_writes_statement() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "app-linux-amd64", b"test data");
    let output = dir.path().join("provenance.json");

    let mut config = GenerationConfig::new(artifact.to_string_lossy());
    config.output_path = output.clone();
    file_generator(vec![HashAlgorithm::Sha256]).generate_and_persist(&config)?;

    assert!(fs::metadata(&output)?.len() > 1);
    let doc = read_json(&output);

    assert_eq!(doc["_type"], STATEMENT_TYPE_V01);
    assert_eq!(doc["predicateType"], PREDICATE_TYPE_V02);
    assert_eq!(doc["subject"].as_array().map(Vec::len), Some(1));
    assert_eq!(doc["subject"][0]["name"], "app-linux-amd64");
    assert_eq!(
        doc["subject"][0]["digest"],
        json!({"sha256": "916f0027a575074ce72a331777c3478d6513f786a591bd892da1a577bf2335f9"})
    );

    let predicate = &doc["predicate"];
    assert_eq!(
        predicate["builder"]["id"],
        "https://github.com/org/repo/Attestations/GitHubHostedActions@v1"
    );
    assert_eq!(predicate["buildType"], BUILD_TYPE);
    assert_eq!(
        predicate["invocation"]["configSource"],
        json!({
            "uri": "git+https://github.com/org/repo",
            "digest": {"sha1": SHA},
            "entryPoint": "Integration"
        })
    );
    assert_eq!(predicate["invocation"]["parameters"], json!({"release": "true"}));
    assert_eq!(
        predicate["invocation"]["environment"],
        json!({"arch": "X64", "name": "GitHub Actions 2", "os": "Linux"})
    );
    assert_eq!(predicate["metadata"]["buildInvocationId"], "1029384756-2");
    assert_eq!(
        predicate["metadata"]["completeness"],
        json!({"parameters": true, "environment": false, "materials": false})
    );
    assert_eq!(predicate["metadata"]["reproducible"], false);
    assert!(predicate["metadata"]["buildFinishedOn"]
        .as_str()
        .is_some_and(|ts| ts.ends_with('Z')));
    assert_eq!(
        predicate["materials"],
        json!([{"uri": "git+https://github.com/org/repo", "digest": {"sha1": SHA}}])
    );
    Ok(())
}

#[test]
fn test_files_mode_multiple_digests() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "app.tar.gz", b"test data");

    let statement = file_generator(vec![HashAlgorithm::Sha512, HashAlgorithm::Sha256])
        .generate(&artifact.to_string_lossy(), &[] as &[&str])?;

    let digest = &statement.subject[0].digest;
    assert_eq!(
        digest.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["sha256", "sha512"]
    );
    assert_eq!(digest["sha512"].len(), 128);
    Ok(())
}

#[test]
fn test_extra_materials_keep_order() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "artifact.bin", b"artifact");
    let first = write_file(
        dir.path(),
        "first.json",
        br#"[{
            "uri": "pkg:deb/debian/stunnel@5.50-3?arch=amd64",
            "digest": {"sha256": "e1731ae217fcbc64d4c00d707dcead45c828c5f762bcf8cc56d87de511e096fa"}
        }, {
            "uri": "pkg:deb/debian/python-3.7@3.7.3-2?arch=amd64",
            "digest": {"sha256": "b1a6aa2fa7ec5b4d8d1e5c6c22c9c0a7e8b7e2b2ad9f7f6c4f33e7e64bfe8e0c"}
        }]"#,
    );
    let second = write_file(
        dir.path(),
        "second.json",
        br#"[{
            "uri": "pkg:docker/alpine@3.14",
            "digest": {"sha256": "0a97eee8041e2b6c0e65abb2700b0705d0da5525ca69060b9e0bde8a3d17afdb"}
        }]"#,
    );
    let empty = write_file(dir.path(), "empty.json", b"[]");

    let statement = file_generator(Vec::new()).generate(
        &artifact.to_string_lossy(),
        &[second, empty, first],
    )?;

    let uris: Vec<&str> = statement
        .predicate
        .materials
        .iter()
        .map(|m| m.uri.as_str())
        .collect();
    assert_eq!(
        uris,
        vec![
            "git+https://github.com/org/repo",
            "pkg:docker/alpine@3.14",
            "pkg:deb/debian/stunnel@5.50-3?arch=amd64",
            "pkg:deb/debian/python-3.7@3.7.3-2?arch=amd64",
        ]
    );
    Ok(())
}

#[test]
fn test_duplicate_materials_are_kept() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "artifact.bin", b"artifact");
    let materials = write_file(
        dir.path(),
        "materials.json",
        br#"[{"uri": "pkg:generic/tool", "digest": {"sha256": "aa"}}]"#,
    );

    let statement = file_generator(Vec::new()).generate(
        &artifact.to_string_lossy(),
        &[materials.clone(), materials],
    )?;

    assert_eq!(statement.predicate.materials.len(), 3);
    assert_eq!(
        statement.predicate.materials[1],
        statement.predicate.materials[2]
    );
    Ok(())
}

#[test]
fn test_broken_materials_name_their_source() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "artifact.bin", b"artifact");
    let broken = write_file(dir.path(), "broken.json", br#"[{"uri": "pkg:generic/x", "#);
    let output = dir.path().join("provenance.json");

    let mut config = GenerationConfig::new(artifact.to_string_lossy());
    config.output_path = output.clone();
    config.extra_materials = vec![broken.clone()];

    let err = file_generator(Vec::new())
        .generate_and_persist(&config)
        .unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().starts_with(&format!(
        "failed retrieving extra materials for {}: ",
        broken.to_string_lossy()
    )));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_missing_materials_document() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "artifact.bin", b"artifact");

    let err = file_generator(Vec::new())
        .generate(
            &artifact.to_string_lossy(),
            &[dir.path().join("does-not-exist.json")],
        )
        .unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(
        err.to_string()
            .starts_with("failed retrieving extra materials: ")
    );
    Ok(())
}

#[test]
fn test_missing_artifact_writes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("provenance.json");

    let mut config = GenerationConfig::new("non-existing-folder/unknown-file");
    config.output_path = output.clone();

    let err = file_generator(Vec::new())
        .generate_and_persist(&config)
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_directory_artifact_is_not_found() -> Result<()> {
    let dir = tempdir()?;

    let err = file_generator(Vec::new())
        .generate(&dir.path().to_string_lossy(), &[] as &[&str])
        .unwrap_err();

    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn test_unwritable_output_path() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "artifact.bin", b"artifact");

    let mut config = GenerationConfig::new(artifact.to_string_lossy());
    config.output_path = dir.path().join("missing-dir").join("provenance.json");

    let err = file_generator(Vec::new())
        .generate_and_persist(&config)
        .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("missing-dir"));
    Ok(())
}

#[test]
fn test_envelope_output() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "app.zip", b"test data");
    let output = dir.path().join("provenance.intoto.jsonl");

    let mut config = GenerationConfig::new(artifact.to_string_lossy());
    config.output_path = output.clone();
    config.format = OutputFormat::Envelope;

    let statement = file_generator(Vec::new()).generate_and_persist(&config)?;
    let doc = read_json(&output);

    assert_eq!(doc["payloadType"], DSSE_PAYLOAD_TYPE);
    assert_eq!(doc["signatures"], json!([]));

    let payload: crate::in_toto::Envelope = serde_json::from_value(doc)?;
    let decoded: Value = serde_json::from_slice(payload.payload())?;
    assert_eq!(decoded["subject"][0]["name"], "app.zip");
    assert_eq!(decoded, serde_json::to_value(&statement)?);
    Ok(())
}

#[test]
fn test_self_hosted_context_without_inputs() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "artifact.bin", b"artifact");

    let mut ctx = github_context();
    ctx.runner.hosted = false;
    ctx.github.event.inputs = Value::Null;
    ctx.github.run_attempt.clear();

    let statement = ProvenanceGenerator::new(ctx, FileSubjectResolver::default())
        .generate(&artifact.to_string_lossy(), &[] as &[&str])?;
    let doc = serde_json::to_value(&statement)?;

    assert_eq!(
        doc["predicate"]["builder"]["id"],
        "https://github.com/org/repo/Attestations/SelfHostedActions@v1"
    );
    assert_eq!(
        doc["predicate"]["invocation"].get("parameters"),
        Some(&Value::Null)
    );
    assert_eq!(doc["predicate"]["metadata"]["buildInvocationId"], "1029384756");
    Ok(())
}

#[test]
fn test_push_event_keeps_parameters_key() -> Result<()> {
    let dir = tempdir()?;
    let artifact = write_file(dir.path(), "artifact.bin", b"artifact");
    let event = write_file(
        dir.path(),
        "event.json",
        br#"{"ref": "refs/heads/main", "pusher": {"name": "octocat"}}"#,
    );
    let event_path = event.to_string_lossy().to_string();

    let ctx = ExecutionContext::from_lookup(|key| match key {
        "GITHUB_EVENT_PATH" => Some(event_path.clone()),
        "GITHUB_REPOSITORY" => Some("org/repo".to_string()),
        "GITHUB_EVENT_NAME" => Some("push".to_string()),
        _ => None,
    })?;

    let statement = ProvenanceGenerator::new(ctx, FileSubjectResolver::default())
        .generate(&artifact.to_string_lossy(), &[] as &[&str])?;
    let doc = serde_json::to_value(&statement)?;
    let invocation = &doc["predicate"]["invocation"];

    let mut keys: Vec<&str> = invocation
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();
    keys.sort_unstable();
    assert_eq!(keys, vec!["configSource", "environment", "parameters"]);
    assert!(invocation["parameters"].is_null());
    Ok(())
}
