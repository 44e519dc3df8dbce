use chaosctl_core::{Diagnostic, FieldPath};
use serde_json::Value;

pub fn parse_json(input: &str) -> Result<Value, Vec<Diagnostic>> {
    serde_json::from_str::<Value>(input).map_err(|err| {
        vec![Diagnostic::error(
            "json.parse_error",
            FieldPath::root(),
            format!(
                "json parse failed at line {} column {}: {err}",
                err.line(),
                err.column()
            ),
        )]
    })
}
