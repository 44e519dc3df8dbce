mod chaos;
mod workflow;

pub use chaos::{ChaosResourceHeader, ChaosResourceMeta, CHAOS_ENGINE_KIND};
pub use workflow::{
    Artifact, Inputs, ObjectMeta, RawArtifact, Template, WorkflowDocument, WorkflowSpec,
};
