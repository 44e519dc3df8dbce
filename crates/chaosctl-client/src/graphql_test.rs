use super::{
    check_status, create_workflow_request, decode_membership, decode_receipt, membership_request,
    CREATE_WORKFLOW_MUTATION, MEMBERSHIP_QUERY,
};
use chaosctl_engine::{CollaboratorError, MemberRole};
use chaosctl_sdk::{SubmissionPayload, WeightEntry};
use serde_json::json;

fn payload() -> SubmissionPayload {
    SubmissionPayload {
        project_id: "P".to_string(),
        cluster_id: "C".to_string(),
        workflow_name: "wf".to_string(),
        workflow_manifest: "{\"metadata\":{\"name\":\"wf\"}}".to_string(),
        weightages: vec![WeightEntry {
            experiment_name: "pod-delete".to_string(),
            weightage: 10,
        }],
        is_custom_workflow: true,
    }
}

#[test]
fn membership_request_carries_username_variable() {
    let request = membership_request("admin");
    assert_eq!(request.query, MEMBERSHIP_QUERY);
    assert_eq!(
        serde_json::to_value(&request).expect("encode"),
        json!({
            "operationName": "getUser",
            "query": MEMBERSHIP_QUERY,
            "variables": {"username": "admin"}
        })
    );
}

#[test]
fn create_request_wraps_payload_as_input() {
    let request = create_workflow_request(&payload()).expect("request");
    assert_eq!(request.query, CREATE_WORKFLOW_MUTATION);
    let input = &request.variables["input"];
    assert_eq!(input["project_id"], json!("P"));
    assert_eq!(input["isCustomWorkflow"], json!(true));
    assert_eq!(
        input["weightages"],
        json!([{"experiment_name": "pod-delete", "weightage": 10}])
    );
}

#[test]
fn decodes_membership_snapshot() {
    let body = json!({
        "data": {
            "getUser": {
                "id": "user-1",
                "projects": [
                    {
                        "id": "P",
                        "name": "default",
                        "members": [
                            {"user_id": "user-1", "user_name": "admin", "role": "Owner"},
                            {"user_id": "user-2", "user_name": "guest", "role": "Viewer"}
                        ]
                    }
                ]
            }
        }
    })
    .to_string();
    let snapshot = decode_membership(&body).expect("decode");
    assert_eq!(snapshot.user_id, "user-1");
    assert_eq!(snapshot.projects.len(), 1);
    assert_eq!(snapshot.projects[0].members[0].role, MemberRole::Owner);
    assert_eq!(snapshot.projects[0].members[1].role, MemberRole::Viewer);
}

#[test]
fn null_project_list_decodes_as_empty() {
    let body = r#"{"data":{"getUser":{"id":"user-1","projects":null}}}"#;
    let snapshot = decode_membership(body).expect("decode");
    assert!(snapshot.projects.is_empty());
}

#[test]
fn decodes_create_receipt() {
    let body = r#"{"data":{"createChaosWorkFlow":{"workflow_id":"wf-1","cluster_id":"C","workflow_name":"wf"}}}"#;
    let receipt = decode_receipt(body).expect("decode");
    assert_eq!(receipt.workflow_id, "wf-1");
    assert_eq!(receipt.cluster_id, "C");
    assert_eq!(receipt.workflow_name, "wf");
}

#[test]
fn graphql_errors_become_rejections() {
    let body = r#"{"errors":[{"message":"cluster inactive"},{"message":"quota exceeded"}],"data":null}"#;
    let err = decode_receipt(body).expect_err("rejected");
    assert_eq!(
        err,
        CollaboratorError::Rejected("cluster inactive; quota exceeded".to_string())
    );
}

#[test]
fn missing_data_is_rejected() {
    for body in [r#"{}"#, r#"{"data":null}"#, r#"{"data":{"getUser":null}}"#] {
        let err = decode_membership(body).expect_err("no data");
        assert!(matches!(err, CollaboratorError::Rejected(_)), "{body}");
    }
}

#[test]
fn non_json_body_is_a_transport_failure() {
    let err = decode_receipt("<html>bad gateway</html>").expect_err("not json");
    assert!(matches!(err, CollaboratorError::Transport(_)));
}

#[test]
fn status_codes_map_to_error_kinds() {
    assert!(check_status(200, "").is_ok());
    assert!(matches!(
        check_status(401, ""),
        Err(CollaboratorError::Authentication(_))
    ));
    assert!(matches!(
        check_status(403, ""),
        Err(CollaboratorError::Authentication(_))
    ));
    let err = check_status(502, &"x".repeat(500)).expect_err("bad gateway");
    match err {
        CollaboratorError::Transport(message) => {
            assert!(message.starts_with("backend answered HTTP 502: "));
            assert!(message.ends_with("..."));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}
