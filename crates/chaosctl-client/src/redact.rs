use serde_json::{Map, Value};

const REDACTED: &str = "[REDACTED]";

/// Copy of `value` with credential-like fields masked, for logging.
pub fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut out = Map::<String, Value>::new();
            for (key, child) in object {
                if is_secret_key(key.to_lowercase().as_str()) {
                    out.insert(key.clone(), Value::String(REDACTED.to_string()));
                    continue;
                }
                out.insert(key.clone(), redact_value(child));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        _ => value.clone(),
    }
}

fn is_secret_key(key: &str) -> bool {
    key.contains("token")
        || key.contains("authorization")
        || key.contains("password")
        || key.contains("secret")
}

#[cfg(test)]
#[path = "redact_test.rs"]
mod tests;
