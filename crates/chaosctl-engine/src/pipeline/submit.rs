use super::collaborators::{CollaboratorError, MembershipSource, SubmissionReceipt, WorkflowSubmitter};
use crate::policy::{
    authorize_workflow_creation, AccessDecision, DenialReason, MemberRole, MembershipDirectory,
};
use chaosctl_sdk::{
    artifact_outcomes, assign_weights, build_submission_payload, serialize_manifest,
    ArtifactOutcome, ExperimentDescriptor, ExtractOptions, ExtractionSummary, FixedWeight,
    PayloadError, SubmissionPayload, SubmissionTarget, WeightPolicy, WorkflowDocument,
    DEFAULT_EXPERIMENT_WEIGHT,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

static DEFAULT_WEIGHT_POLICY: FixedWeight = FixedWeight(DEFAULT_EXPERIMENT_WEIGHT);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamStage {
    Membership,
    Submission,
}

impl fmt::Display for UpstreamStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamStage::Membership => f.write_str("membership lookup"),
            UpstreamStage::Submission => f.write_str("workflow submission"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid submission input: {0}")]
    Input(#[from] PayloadError),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("user doesn't have edit access to project `{project_id}`: {reason}")]
    Authorization {
        project_id: String,
        reason: DenialReason,
    },
    #[error("{stage} failed: {reason}")]
    Upstream { stage: UpstreamStage, reason: String },
}

impl SubmitError {
    fn from_collaborator(stage: UpstreamStage, error: CollaboratorError) -> Self {
        match error {
            CollaboratorError::Authentication(reason) => SubmitError::Authentication(reason),
            CollaboratorError::Transport(reason) | CollaboratorError::Rejected(reason) => {
                SubmitError::Upstream { stage, reason }
            }
        }
    }
}

#[derive(Clone, Copy)]
pub struct PrepareOptions<'a> {
    pub extract: ExtractOptions,
    pub weight_policy: &'a dyn WeightPolicy,
}

impl Default for PrepareOptions<'static> {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            weight_policy: &DEFAULT_WEIGHT_POLICY,
        }
    }
}

/// Everything known before the backend is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedSubmission {
    pub payload: SubmissionPayload,
    pub experiments: Vec<ExperimentDescriptor>,
    pub summary: ExtractionSummary,
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub prepared: PreparedSubmission,
    pub role: MemberRole,
    pub receipt: SubmissionReceipt,
}

/// Extracts experiments, weighs them and builds the payload. No I/O.
pub fn prepare_submission(
    document: &WorkflowDocument,
    target: &SubmissionTarget,
    options: &PrepareOptions<'_>,
) -> Result<PreparedSubmission, SubmitError> {
    let mut summary = ExtractionSummary::default();
    let mut experiments = Vec::new();
    for outcome in artifact_outcomes(document, &options.extract) {
        summary.record(&outcome);
        match outcome {
            ArtifactOutcome::Experiment(descriptor) => experiments.push(descriptor),
            ArtifactOutcome::Skipped {
                template_index,
                artifact_index,
                reason,
            } => debug!(template_index, artifact_index, ?reason, "skipping artifact"),
            ArtifactOutcome::Malformed(malformed) => warn!(
                template = %malformed.template_name,
                field_path = %malformed.field_path,
                reason = %malformed.reason,
                "ignoring artifact that is not a chaos resource"
            ),
        }
    }

    let weights = assign_weights(experiments.iter().cloned(), options.weight_policy);
    let manifest = serialize_manifest(document)?;
    let payload = build_submission_payload(document, manifest, weights, target)?;
    let fingerprint = payload.fingerprint()?;

    info!(
        workflow = %payload.workflow_name,
        experiments = summary.experiments,
        engine_specs = summary.engine_specs,
        malformed = summary.malformed.len(),
        %fingerprint,
        "prepared workflow submission"
    );

    Ok(PreparedSubmission {
        payload,
        experiments,
        summary,
        fingerprint,
    })
}

/// Authorizes the caller and, only when granted, submits the payload once.
pub fn submit_prepared(
    prepared: PreparedSubmission,
    membership: &dyn MembershipSource,
    submitter: &dyn WorkflowSubmitter,
) -> Result<SubmissionOutcome, SubmitError> {
    let snapshot = membership
        .fetch_membership()
        .map_err(|error| SubmitError::from_collaborator(UpstreamStage::Membership, error))?;
    debug!(
        user_id = %snapshot.user_id,
        projects = snapshot.projects.len(),
        "fetched project membership"
    );

    let directory = MembershipDirectory::from_projects(snapshot.projects);
    let project_id = prepared.payload.project_id.as_str();
    let decision = authorize_workflow_creation(&snapshot.user_id, &directory, project_id);
    match &decision {
        AccessDecision::Granted { role } => {
            info!(project_id, %role, "workflow creation authorized")
        }
        AccessDecision::Denied { reason, .. } => {
            warn!(project_id, %reason, "workflow creation denied")
        }
    }
    let role = decision.into_result()?;

    let receipt = submitter
        .submit(&prepared.payload)
        .map_err(|error| SubmitError::from_collaborator(UpstreamStage::Submission, error))?;
    info!(
        workflow_id = %receipt.workflow_id,
        workflow = %receipt.workflow_name,
        cluster_id = %receipt.cluster_id,
        "workflow created"
    );

    Ok(SubmissionOutcome {
        prepared,
        role,
        receipt,
    })
}

#[cfg(test)]
#[path = "submit_test.rs"]
mod tests;
