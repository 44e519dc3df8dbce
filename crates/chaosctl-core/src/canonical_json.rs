use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Encodes `value` with object keys sorted at every depth and no whitespace.
///
/// Equal values always produce identical bytes, whichever key order the
/// `serde_json` map was built with.
pub fn canonical_json_bytes(value: &Value) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&sort_keys(value))
}

pub fn canonical_json_string(value: &Value) -> serde_json::Result<String> {
    serde_json::to_string(&sort_keys(value))
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let ordered = object
                .iter()
                .map(|(key, child)| (key.clone(), sort_keys(child)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(ordered.into_iter().collect::<Map<_, _>>())
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        _ => value.clone(),
    }
}

#[cfg(test)]
#[path = "canonical_json_test.rs"]
mod tests;
