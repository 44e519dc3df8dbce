mod gate;

pub use gate::{
    authorize_workflow_creation, AccessDecision, DenialReason, MemberRole, MembershipDirectory,
    Project, ProjectMember,
};
