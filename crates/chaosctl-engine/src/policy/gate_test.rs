use super::{
    authorize_workflow_creation, AccessDecision, DenialReason, MemberRole, MembershipDirectory,
    Project, ProjectMember,
};
use crate::pipeline::SubmitError;
use serde_json::json;

fn member(user_id: &str, role: &str) -> ProjectMember {
    ProjectMember {
        user_id: user_id.to_string(),
        user_name: None,
        role: MemberRole::from(role),
    }
}

fn project(id: &str, members: Vec<ProjectMember>) -> Project {
    Project {
        id: id.to_string(),
        name: Some(format!("{id}-name")),
        members,
    }
}

fn directory() -> MembershipDirectory {
    MembershipDirectory::from_projects(vec![
        project(
            "P",
            vec![
                member("userA", "Owner"),
                member("userB", "Viewer"),
                member("userC", "Editor"),
                member("userD", "owner"),
            ],
        ),
        project("Q", vec![member("userB", "Owner")]),
    ])
}

#[test]
fn owner_and_editor_are_granted() {
    let directory = directory();
    assert_eq!(
        authorize_workflow_creation("userA", &directory, "P"),
        AccessDecision::Granted {
            role: MemberRole::Owner
        }
    );
    assert_eq!(
        authorize_workflow_creation("userC", &directory, "P"),
        AccessDecision::Granted {
            role: MemberRole::Editor
        }
    );
}

#[test]
fn viewer_is_denied() {
    let decision = authorize_workflow_creation("userB", &directory(), "P");
    assert_eq!(
        decision,
        AccessDecision::Denied {
            project_id: "P".to_string(),
            reason: DenialReason::RoleNotPermitted {
                role: MemberRole::Viewer
            },
        }
    );
}

#[test]
fn role_match_is_case_sensitive() {
    let decision = authorize_workflow_creation("userD", &directory(), "P");
    assert!(matches!(
        decision,
        AccessDecision::Denied {
            reason: DenialReason::RoleNotPermitted {
                role: MemberRole::Other(ref role)
            },
            ..
        } if role == "owner"
    ));
}

#[test]
fn unknown_project_is_denied_even_for_owners_elsewhere() {
    let decision = authorize_workflow_creation("userA", &directory(), "Z");
    assert!(matches!(
        decision,
        AccessDecision::Denied {
            reason: DenialReason::UnknownProject,
            ..
        }
    ));
}

#[test]
fn non_member_is_denied() {
    let decision = authorize_workflow_creation("userA", &directory(), "Q");
    assert!(matches!(
        decision,
        AccessDecision::Denied {
            reason: DenialReason::NotAMember,
            ..
        }
    ));
}

#[test]
fn role_in_another_project_does_not_leak() {
    let directory = directory();
    assert!(authorize_workflow_creation("userB", &directory, "Q").is_granted());
    assert!(!authorize_workflow_creation("userB", &directory, "P").is_granted());
}

#[test]
fn later_duplicate_project_wins() {
    let directory = MembershipDirectory::from_projects(vec![
        project("P", vec![member("userA", "Owner")]),
        project("P", vec![member("userA", "Viewer")]),
    ]);
    assert_eq!(directory.len(), 1);
    assert!(!authorize_workflow_creation("userA", &directory, "P").is_granted());
}

#[test]
fn any_permitted_row_for_the_caller_grants() {
    let directory = MembershipDirectory::from_projects(vec![project(
        "P",
        vec![member("userA", "Viewer"), member("userA", "Owner")],
    )]);
    assert_eq!(
        authorize_workflow_creation("userA", &directory, "P"),
        AccessDecision::Granted {
            role: MemberRole::Owner
        }
    );
}

#[test]
fn duplicate_rows_without_permitted_role_are_denied_with_first_role() {
    let directory = MembershipDirectory::from_projects(vec![project(
        "P",
        vec![
            member("userA", "Viewer"),
            member("userB", "Owner"),
            member("userA", "editor"),
        ],
    )]);
    assert_eq!(
        authorize_workflow_creation("userA", &directory, "P"),
        AccessDecision::Denied {
            project_id: "P".to_string(),
            reason: DenialReason::RoleNotPermitted {
                role: MemberRole::Viewer
            },
        }
    );
}

#[test]
fn empty_directory_denies() {
    let directory = MembershipDirectory::default();
    assert!(directory.is_empty());
    assert!(!authorize_workflow_creation("userA", &directory, "P").is_granted());
}

#[test]
fn denial_converts_to_authorization_error() {
    let err = authorize_workflow_creation("userB", &directory(), "P")
        .into_result()
        .expect_err("viewer must be denied");
    assert!(matches!(err, SubmitError::Authorization { .. }));
    assert!(err
        .to_string()
        .starts_with("user doesn't have edit access to project `P`"));

    let role = authorize_workflow_creation("userA", &directory(), "P")
        .into_result()
        .expect("owner is granted");
    assert_eq!(role, MemberRole::Owner);
}

#[test]
fn roles_deserialize_from_wire_strings() {
    let member: ProjectMember =
        serde_json::from_value(json!({"user_id": "u1", "user_name": "alice", "role": "Editor"}))
            .expect("decode");
    assert_eq!(member.role, MemberRole::Editor);
    let member: ProjectMember =
        serde_json::from_value(json!({"user_id": "u2", "role": "Admin"})).expect("decode");
    assert_eq!(member.role, MemberRole::Other("Admin".to_string()));
    assert_eq!(
        serde_json::to_value(&member.role).expect("encode"),
        json!("Admin")
    );
}

#[test]
fn decisions_serialize_tagged() {
    let decision = authorize_workflow_creation("userB", &directory(), "P");
    assert_eq!(
        serde_json::to_value(&decision).expect("encode"),
        json!({
            "decision": "denied",
            "project_id": "P",
            "reason": {"kind": "role_not_permitted", "role": "Viewer"}
        })
    );
}
