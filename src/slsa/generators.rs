use crate::hash::DigestSet;
use crate::slsa::{
    BUILD_TYPE, Builder, Completeness, ConfigSource, Invocation, InvocationEnvironment, Material,
    Metadata, Predicate,
};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

pub fn make_builder(id: &str) -> Builder {
    Builder { id: id.to_string() }
}

pub fn make_config_source(uri: &str, digest: DigestSet, entry_point: &str) -> ConfigSource {
    ConfigSource {
        uri: uri.to_string(),
        digest,
        entry_point: entry_point.to_string(),
    }
}

pub fn make_invocation(
    config_source: ConfigSource,
    parameters: Value,
    environment: InvocationEnvironment,
) -> Invocation {
    Invocation {
        config_source,
        parameters,
        environment,
    }
}

/// Build metadata. Parameters are carried verbatim, so they are complete;
/// the runner environment and material list are not exhaustive.
pub fn make_metadata(invocation_id: &str, finished_on: Option<DateTime<Utc>>) -> Metadata {
    Metadata {
        build_invocation_id: invocation_id.to_string(),
        build_finished_on: finished_on.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        completeness: Completeness {
            parameters: true,
            environment: false,
            materials: false,
        },
        reproducible: false,
    }
}

pub fn make_material(uri: &str, digest: DigestSet) -> Material {
    Material {
        uri: uri.to_string(),
        digest,
    }
}

pub fn generate_predicate(
    builder: Builder,
    invocation: Invocation,
    metadata: Metadata,
    materials: Vec<Material>,
) -> Predicate {
    Predicate {
        builder,
        build_type: BUILD_TYPE.to_string(),
        invocation,
        metadata,
        materials,
    }
}
