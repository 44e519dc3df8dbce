use crate::policy::Project;
use chaosctl_sdk::SubmissionPayload;
use serde::{Deserialize, Serialize};

/// The caller's identity and every project they can see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSnapshot {
    pub user_id: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub workflow_id: String,
    pub workflow_name: String,
    pub cluster_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

pub trait MembershipSource {
    fn fetch_membership(&self) -> Result<MembershipSnapshot, CollaboratorError>;
}

pub trait WorkflowSubmitter {
    fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, CollaboratorError>;
}
