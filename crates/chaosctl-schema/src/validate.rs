use chaosctl_core::{Diagnostic, FieldPath};
use jsonschema::JSONSchema;
use serde_json::Value;

use crate::registry::get_json_schema;

pub fn validate_schema_instance(schema_id: &str, instance: &Value) -> Vec<Diagnostic> {
    let Some(schema) = get_json_schema(schema_id) else {
        return vec![Diagnostic::error(
            "schema_registry.unknown_schema",
            FieldPath::root(),
            format!("unknown schema id: {schema_id}"),
        )];
    };

    let schema_json: Value = match serde_json::from_str(schema.json) {
        Ok(value) => value,
        Err(err) => {
            return vec![Diagnostic::error(
                "schema_registry.invalid_embedded_schema",
                FieldPath::root(),
                format!("embedded schema json parse failed: {err}"),
            )];
        }
    };

    let compiled = match JSONSchema::options().compile(&schema_json) {
        Ok(compiled) => compiled,
        Err(err) => {
            return vec![Diagnostic::error(
                "schema_registry.compile_failed",
                FieldPath::root(),
                format!("schema compile failed for {schema_id}: {err}"),
            )];
        }
    };

    let mut diagnostics = match compiled.validate(instance) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|error| {
                Diagnostic::error(
                    "json_schema.validation",
                    FieldPath::from_json_pointer(error.instance_path.to_string().as_str()),
                    error.to_string(),
                )
            })
            .collect(),
    };
    Diagnostic::sort_stable(&mut diagnostics);
    diagnostics
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
