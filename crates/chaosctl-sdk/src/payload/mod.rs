//! Construction of the workflow-creation request.

use crate::documents::WorkflowDocument;
use crate::weights::WeightEntry;
use chaosctl_core::{canonical_json_string, fingerprint_hex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a workflow is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionTarget {
    pub project_id: String,
    pub cluster_id: String,
}

impl SubmissionTarget {
    pub fn new(project_id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            cluster_id: cluster_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub project_id: String,
    pub cluster_id: String,
    pub workflow_name: String,
    pub workflow_manifest: String,
    pub weightages: Vec<WeightEntry>,
    #[serde(rename = "isCustomWorkflow")]
    pub is_custom_workflow: bool,
}

impl SubmissionPayload {
    /// SHA-256 of the canonical payload JSON.
    pub fn fingerprint(&self) -> Result<String, PayloadError> {
        let value = serde_json::to_value(self)?;
        Ok(fingerprint_hex(&value)?)
    }
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("missing {field}")]
    MissingIdentifier { field: &'static str },
    #[error("workflow manifest has no metadata.name")]
    MissingWorkflowName,
    #[error("failed to encode workflow manifest: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Canonical JSON of the manifest: keys sorted, no whitespace.
pub fn serialize_manifest(document: &WorkflowDocument) -> Result<String, PayloadError> {
    let value = serde_json::to_value(document)?;
    Ok(canonical_json_string(&value)?)
}

pub fn build_submission_payload(
    document: &WorkflowDocument,
    manifest_text: String,
    weights: Vec<WeightEntry>,
    target: &SubmissionTarget,
) -> Result<SubmissionPayload, PayloadError> {
    let project_id = required_identifier(&target.project_id, "project id")?;
    let cluster_id = required_identifier(&target.cluster_id, "cluster id")?;
    let workflow_name = document.name().ok_or(PayloadError::MissingWorkflowName)?;

    Ok(SubmissionPayload {
        project_id,
        cluster_id,
        workflow_name: workflow_name.to_string(),
        workflow_manifest: manifest_text,
        weightages: weights,
        is_custom_workflow: true,
    })
}

fn required_identifier(value: &str, field: &'static str) -> Result<String, PayloadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PayloadError::MissingIdentifier { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
