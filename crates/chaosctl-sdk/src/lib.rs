pub mod documents;
pub mod extract;
pub mod load;
pub mod parse;
pub mod payload;
pub mod validate;
pub mod weights;

pub use documents::{
    Artifact, ChaosResourceHeader, ChaosResourceMeta, Inputs, ObjectMeta, RawArtifact, Template,
    WorkflowDocument, WorkflowSpec, CHAOS_ENGINE_KIND,
};
pub use extract::{
    artifact_outcomes, experiments, ArtifactOutcome, ArtifactOutcomes, ArtifactScan,
    ExperimentDescriptor, Experiments, ExtractOptions, ExtractionSummary, MalformedArtifact,
    SkipReason,
};
pub use load::{load_workflow_manifest, LoadError};
pub use parse::{
    decode_chaos_resource, parse_workflow_manifest, parse_workflow_manifest_with_options,
    DocumentFormat, ParseManifestOptions,
};
pub use payload::{
    build_submission_payload, serialize_manifest, PayloadError, SubmissionPayload,
    SubmissionTarget,
};
pub use validate::{validate_workflow_manifest, WORKFLOW_KIND};
pub use weights::{
    assign_weights, AnnotationWeight, FixedWeight, WeightEntry, WeightPolicy,
    DEFAULT_EXPERIMENT_WEIGHT, WEIGHT_ANNOTATION,
};
