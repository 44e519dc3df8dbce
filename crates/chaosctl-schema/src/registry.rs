pub const SCHEMA_WORKFLOW: &str = "chaosctl/argo-workflow";
pub const SCHEMA_CHAOS_RESOURCE: &str = "chaosctl/chaos-resource";

const WORKFLOW_SCHEMA: &str = include_str!("../schemas/workflow.schema.json");
const CHAOS_RESOURCE_SCHEMA: &str = include_str!("../schemas/chaos-resource.schema.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedSchema {
    pub id: &'static str,
    pub json: &'static str,
}

pub fn get_json_schema(schema_id: &str) -> Option<EmbeddedSchema> {
    match schema_id {
        SCHEMA_WORKFLOW => Some(EmbeddedSchema {
            id: SCHEMA_WORKFLOW,
            json: WORKFLOW_SCHEMA,
        }),
        SCHEMA_CHAOS_RESOURCE => Some(EmbeddedSchema {
            id: SCHEMA_CHAOS_RESOURCE,
            json: CHAOS_RESOURCE_SCHEMA,
        }),
        _ => None,
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
