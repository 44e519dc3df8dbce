use crate::canonical_json::canonical_json_bytes;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hex SHA-256 over the canonical JSON encoding of `value`.
pub fn fingerprint_hex(value: &Value) -> serde_json::Result<String> {
    let bytes = canonical_json_bytes(value)?;
    Ok(format!("{:x}", Sha256::digest(bytes)))
}

#[cfg(test)]
#[path = "fingerprint_test.rs"]
mod tests;
