pub mod registry;
pub mod validate;

pub use registry::{get_json_schema, EmbeddedSchema, SCHEMA_CHAOS_RESOURCE, SCHEMA_WORKFLOW};
pub use validate::validate_schema_instance;
