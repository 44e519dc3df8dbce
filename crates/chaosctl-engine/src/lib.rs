pub mod pipeline;
pub mod policy;

pub use pipeline::{
    prepare_submission, submit_prepared, CollaboratorError, MembershipSnapshot, MembershipSource,
    PrepareOptions, PreparedSubmission, SubmissionOutcome, SubmissionReceipt, SubmitError,
    UpstreamStage, WorkflowSubmitter,
};
pub use policy::{
    authorize_workflow_creation, AccessDecision, DenialReason, MemberRole, MembershipDirectory,
    Project, ProjectMember,
};
