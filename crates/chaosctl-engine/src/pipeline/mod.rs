mod collaborators;
mod submit;

pub use collaborators::{
    CollaboratorError, MembershipSnapshot, MembershipSource, SubmissionReceipt, WorkflowSubmitter,
};
pub use submit::{
    prepare_submission, submit_prepared, PrepareOptions, PreparedSubmission, SubmissionOutcome,
    SubmitError, UpstreamStage,
};
