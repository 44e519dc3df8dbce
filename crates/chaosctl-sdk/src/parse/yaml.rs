use chaosctl_core::{Diagnostic, FieldPath};
use serde_json::Value;

pub fn parse_yaml(input: &str) -> Result<Value, Vec<Diagnostic>> {
    let yaml_value: serde_yaml::Value = serde_yaml::from_str(input).map_err(|err| {
        let message = err.to_string();
        let code = if message.to_ascii_lowercase().contains("duplicate") {
            "yaml.duplicate_key"
        } else {
            "yaml.parse_error"
        };
        vec![Diagnostic::error(
            code,
            FieldPath::root(),
            format!("yaml parse failed: {message}"),
        )]
    })?;

    serde_json::to_value(yaml_value).map_err(|err| {
        vec![Diagnostic::error(
            "yaml.to_json_error",
            FieldPath::root(),
            format!("yaml-to-json conversion failed: {err}"),
        )]
    })
}
