pub mod canonical_json;
pub mod diagnostics;
pub mod field_path;
pub mod fingerprint;

pub use canonical_json::{canonical_json_bytes, canonical_json_string};
pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use field_path::{FieldPath, FieldPathSegment};
pub use fingerprint::fingerprint_hex;
