mod json;
mod yaml;

use crate::documents::{ChaosResourceHeader, WorkflowDocument, CHAOS_ENGINE_KIND};
use chaosctl_core::{Diagnostic, FieldPath};
use chaosctl_schema::{validate_schema_instance, SCHEMA_CHAOS_RESOURCE, SCHEMA_WORKFLOW};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Auto,
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension, falling back to content sniffing.
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension {
            Some("json") => DocumentFormat::Json,
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseManifestOptions {
    pub format: DocumentFormat,
    pub validate_schema: bool,
}

impl Default for ParseManifestOptions {
    fn default() -> Self {
        Self {
            format: DocumentFormat::Auto,
            validate_schema: true,
        }
    }
}

pub fn parse_workflow_manifest(input: &str) -> Result<WorkflowDocument, Vec<Diagnostic>> {
    parse_workflow_manifest_with_options(input, ParseManifestOptions::default())
}

pub fn parse_workflow_manifest_with_options(
    input: &str,
    options: ParseManifestOptions,
) -> Result<WorkflowDocument, Vec<Diagnostic>> {
    let value = parse_value(input, options.format)?;
    if options.validate_schema {
        let diagnostics = validate_schema_instance(SCHEMA_WORKFLOW, &value);
        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }
    }
    parse_typed_document(value, "workflow manifest")
}

/// Decodes the payload of a raw artifact into a chaos resource header.
///
/// The error is a single human-readable reason; callers decide whether a
/// malformed artifact is fatal. A `ChaosEngine` payload is recognised from its
/// `kind` alone, before any other field is checked.
pub fn decode_chaos_resource(data: &str) -> Result<ChaosResourceHeader, String> {
    let value = yaml::parse_yaml(data).map_err(|diagnostics| join_messages(&diagnostics))?;
    if value.get("kind").and_then(Value::as_str) == Some(CHAOS_ENGINE_KIND) {
        let api_version = value
            .get("apiVersion")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Ok(ChaosResourceHeader::engine(api_version));
    }
    let diagnostics = validate_schema_instance(SCHEMA_CHAOS_RESOURCE, &value);
    if !diagnostics.is_empty() {
        return Err(join_messages(&diagnostics));
    }
    parse_typed_document(value, "chaos resource").map_err(|diagnostics| join_messages(&diagnostics))
}

fn parse_value(input: &str, format: DocumentFormat) -> Result<Value, Vec<Diagnostic>> {
    match format {
        DocumentFormat::Auto if looks_like_json(input) => json::parse_json(input),
        DocumentFormat::Auto => yaml::parse_yaml(input),
        DocumentFormat::Json => json::parse_json(input),
        DocumentFormat::Yaml => yaml::parse_yaml(input),
    }
}

fn looks_like_json(input: &str) -> bool {
    let trimmed = input.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

fn parse_typed_document<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, Vec<Diagnostic>> {
    serde_json::from_value::<T>(value).map_err(|err| {
        vec![Diagnostic::error(
            "parse.typed_deserialize_error",
            FieldPath::root(),
            format!("typed parse failed for {what}: {err}"),
        )]
    })
}

fn join_messages(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| {
            if diagnostic.field_path.is_root() {
                diagnostic.message.clone()
            } else {
                format!("{}: {}", diagnostic.field_path, diagnostic.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
