use crate::pipeline::SubmitError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A member's role in a project, compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemberRole {
    Owner,
    Editor,
    Viewer,
    Other(String),
}

impl MemberRole {
    pub fn as_str(&self) -> &str {
        match self {
            MemberRole::Owner => "Owner",
            MemberRole::Editor => "Editor",
            MemberRole::Viewer => "Viewer",
            MemberRole::Other(role) => role,
        }
    }

    pub fn can_create_workflows(&self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::Editor)
    }
}

impl From<String> for MemberRole {
    fn from(role: String) -> Self {
        match role.as_str() {
            "Owner" => MemberRole::Owner,
            "Editor" => MemberRole::Editor,
            "Viewer" => MemberRole::Viewer,
            _ => MemberRole::Other(role),
        }
    }
}

impl From<&str> for MemberRole {
    fn from(role: &str) -> Self {
        MemberRole::from(role.to_string())
    }
}

impl From<MemberRole> for String {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub role: MemberRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
}

/// Projects keyed by id. When an id repeats, the later project replaces the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDirectory {
    projects: BTreeMap<String, Project>,
}

impl MembershipDirectory {
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let projects = projects
            .into_iter()
            .map(|project| (project.id.clone(), project))
            .collect();
        Self { projects }
    }

    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.get(project_id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
    UnknownProject,
    NotAMember,
    RoleNotPermitted { role: MemberRole },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::UnknownProject => f.write_str("project not found for caller"),
            DenialReason::NotAMember => f.write_str("caller is not a member"),
            DenialReason::RoleNotPermitted { role } => write!(f, "role `{role}` cannot create workflows"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Granted {
        role: MemberRole,
    },
    Denied {
        project_id: String,
        reason: DenialReason,
    },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted { .. })
    }

    pub fn into_result(self) -> Result<MemberRole, SubmitError> {
        match self {
            AccessDecision::Granted { role } => Ok(role),
            AccessDecision::Denied { project_id, reason } => {
                Err(SubmitError::Authorization { project_id, reason })
            }
        }
    }
}

/// Grants access only when the caller holds `Owner` or `Editor` in the
/// project. No other input can grant access. A caller listed more than once is
/// granted if any of their rows carries a permitted role.
pub fn authorize_workflow_creation(
    caller_user_id: &str,
    directory: &MembershipDirectory,
    project_id: &str,
) -> AccessDecision {
    let denied = |reason| AccessDecision::Denied {
        project_id: project_id.to_string(),
        reason,
    };

    let Some(project) = directory.project(project_id) else {
        return denied(DenialReason::UnknownProject);
    };
    let mut rows = project
        .members
        .iter()
        .filter(|member| member.user_id == caller_user_id)
        .peekable();
    let Some(first) = rows.peek().copied() else {
        return denied(DenialReason::NotAMember);
    };

    match rows.find(|member| member.role.can_create_workflows()) {
        Some(member) => AccessDecision::Granted {
            role: member.role.clone(),
        },
        None => denied(DenialReason::RoleNotPermitted {
            role: first.role.clone(),
        }),
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
