use super::{prepare_submission, submit_prepared, PrepareOptions, SubmitError, UpstreamStage};
use crate::pipeline::{
    CollaboratorError, MembershipSnapshot, MembershipSource, SubmissionReceipt, WorkflowSubmitter,
};
use crate::policy::{MemberRole, Project, ProjectMember};
use chaosctl_sdk::{
    parse_workflow_manifest, AnnotationWeight, ArtifactScan, ExtractOptions, SubmissionPayload,
    SubmissionTarget, WorkflowDocument,
};
use std::cell::RefCell;

const MANIFEST: &str = r#"
apiVersion: argoproj.io/v1alpha1
kind: Workflow
metadata:
  name: pod-delete-workflow
spec:
  entrypoint: main
  templates:
    - name: main
    - name: install-experiment
      inputs:
        artifacts:
          - name: pod-delete
            raw:
              data: |
                kind: ChaosExperiment
                metadata:
                  name: pod-delete
                  annotations:
                    chaosctl.io/weightage: "4"
    - name: run-chaos
      inputs:
        artifacts:
          - name: engine
            raw:
              data: |
                kind: ChaosEngine
                metadata:
                  name: engine-x
    - name: broken
      inputs:
        artifacts:
          - name: junk
            raw:
              data: "kind: [oops"
"#;

struct FakeMembership {
    result: Result<MembershipSnapshot, CollaboratorError>,
    calls: RefCell<usize>,
}

impl FakeMembership {
    fn returning(result: Result<MembershipSnapshot, CollaboratorError>) -> Self {
        Self {
            result,
            calls: RefCell::new(0),
        }
    }

    fn with_role(user_id: &str, project_id: &str, role: &str) -> Self {
        Self::returning(Ok(MembershipSnapshot {
            user_id: user_id.to_string(),
            projects: vec![Project {
                id: project_id.to_string(),
                name: None,
                members: vec![ProjectMember {
                    user_id: user_id.to_string(),
                    user_name: Some("alice".to_string()),
                    role: MemberRole::from(role),
                }],
            }],
        }))
    }
}

impl MembershipSource for FakeMembership {
    fn fetch_membership(&self) -> Result<MembershipSnapshot, CollaboratorError> {
        *self.calls.borrow_mut() += 1;
        self.result.clone()
    }
}

struct RecordingSubmitter {
    result: Result<SubmissionReceipt, CollaboratorError>,
    submitted: RefCell<Vec<SubmissionPayload>>,
}

impl RecordingSubmitter {
    fn accepting() -> Self {
        Self {
            result: Ok(SubmissionReceipt {
                workflow_id: "wf-123".to_string(),
                workflow_name: "pod-delete-workflow".to_string(),
                cluster_id: "cluster-1".to_string(),
            }),
            submitted: RefCell::new(Vec::new()),
        }
    }

    fn failing(error: CollaboratorError) -> Self {
        Self {
            result: Err(error),
            submitted: RefCell::new(Vec::new()),
        }
    }
}

impl WorkflowSubmitter for RecordingSubmitter {
    fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, CollaboratorError> {
        self.submitted.borrow_mut().push(payload.clone());
        self.result.clone()
    }
}

fn document() -> WorkflowDocument {
    parse_workflow_manifest(MANIFEST).expect("fixture must parse")
}

fn target() -> SubmissionTarget {
    SubmissionTarget::new("P", "cluster-1")
}

#[test]
fn prepare_extracts_weighs_and_builds_payload() {
    let prepared =
        prepare_submission(&document(), &target(), &PrepareOptions::default()).expect("prepare");

    assert_eq!(prepared.experiments.len(), 1);
    assert_eq!(prepared.experiments[0].name, "pod-delete");
    assert_eq!(prepared.payload.weightages.len(), 1);
    assert_eq!(prepared.payload.weightages[0].experiment_name, "pod-delete");
    assert_eq!(prepared.payload.weightages[0].weightage, 10);
    assert!(prepared.payload.is_custom_workflow);
    assert_eq!(prepared.payload.workflow_name, "pod-delete-workflow");
    assert_eq!(prepared.summary.experiments, 1);
    assert_eq!(prepared.summary.engine_specs, 1);
    assert_eq!(prepared.summary.malformed.len(), 1);
    assert_eq!(prepared.summary.malformed[0].template_name, "broken");
    assert_eq!(prepared.fingerprint.len(), 64);
}

#[test]
fn prepare_honours_weight_policy() {
    let policy = AnnotationWeight::default();
    let options = PrepareOptions {
        extract: ExtractOptions {
            scan: ArtifactScan::All,
        },
        weight_policy: &policy,
    };
    let prepared = prepare_submission(&document(), &target(), &options).expect("prepare");
    assert_eq!(prepared.payload.weightages[0].weightage, 4);
}

#[test]
fn prepare_is_deterministic() {
    let first =
        prepare_submission(&document(), &target(), &PrepareOptions::default()).expect("prepare");
    let second =
        prepare_submission(&document(), &target(), &PrepareOptions::default()).expect("prepare");
    assert_eq!(first, second);
}

#[test]
fn prepare_rejects_blank_identifiers() {
    let err = prepare_submission(
        &document(),
        &SubmissionTarget::new("", "cluster-1"),
        &PrepareOptions::default(),
    )
    .expect_err("blank project");
    assert!(matches!(err, SubmitError::Input(_)));
}

#[test]
fn granted_owner_submits_exactly_once() {
    let prepared =
        prepare_submission(&document(), &target(), &PrepareOptions::default()).expect("prepare");
    let membership = FakeMembership::with_role("userA", "P", "Owner");
    let submitter = RecordingSubmitter::accepting();

    let outcome = submit_prepared(prepared.clone(), &membership, &submitter).expect("submit");

    assert_eq!(outcome.role, MemberRole::Owner);
    assert_eq!(outcome.receipt.workflow_id, "wf-123");
    assert_eq!(*membership.calls.borrow(), 1);
    let submitted = submitter.submitted.borrow();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0], prepared.payload);
}

#[test]
fn manifest_without_artifacts_still_submits_with_empty_weights() {
    let document = parse_workflow_manifest(
        "metadata:\n  name: plain-workflow\nspec:\n  templates:\n    - name: main\n",
    )
    .expect("fixture must parse");
    let prepared =
        prepare_submission(&document, &target(), &PrepareOptions::default()).expect("prepare");
    let membership = FakeMembership::with_role("userA", "P", "Owner");
    let submitter = RecordingSubmitter::accepting();

    submit_prepared(prepared, &membership, &submitter).expect("submit");

    let submitted = submitter.submitted.borrow();
    assert_eq!(submitted.len(), 1);
    assert!(submitted[0].weightages.is_empty());
    assert!(submitted[0].is_custom_workflow);
    assert_eq!(submitted[0].workflow_name, "plain-workflow");
}

#[test]
fn viewer_is_denied_and_nothing_is_submitted() {
    let prepared =
        prepare_submission(&document(), &target(), &PrepareOptions::default()).expect("prepare");
    let membership = FakeMembership::with_role("userB", "P", "Viewer");
    let submitter = RecordingSubmitter::accepting();

    let err = submit_prepared(prepared, &membership, &submitter).expect_err("denied");

    assert!(matches!(err, SubmitError::Authorization { ref project_id, .. } if project_id == "P"));
    assert!(submitter.submitted.borrow().is_empty());
}

#[test]
fn unknown_project_is_denied_without_submission() {
    let prepared =
        prepare_submission(&document(), &target(), &PrepareOptions::default()).expect("prepare");
    let membership = FakeMembership::with_role("userA", "other-project", "Owner");
    let submitter = RecordingSubmitter::accepting();

    let err = submit_prepared(prepared, &membership, &submitter).expect_err("denied");

    assert!(matches!(err, SubmitError::Authorization { .. }));
    assert!(submitter.submitted.borrow().is_empty());
}

#[test]
fn membership_failures_stop_before_submission() {
    let prepared =
        prepare_submission(&document(), &target(), &PrepareOptions::default()).expect("prepare");
    let submitter = RecordingSubmitter::accepting();

    let err = submit_prepared(
        prepared.clone(),
        &FakeMembership::returning(Err(CollaboratorError::Authentication(
            "token expired".to_string(),
        ))),
        &submitter,
    )
    .expect_err("auth failure");
    assert!(matches!(err, SubmitError::Authentication(_)));

    let err = submit_prepared(
        prepared,
        &FakeMembership::returning(Err(CollaboratorError::Transport(
            "connection refused".to_string(),
        ))),
        &submitter,
    )
    .expect_err("transport failure");
    assert!(matches!(
        err,
        SubmitError::Upstream {
            stage: UpstreamStage::Membership,
            ..
        }
    ));
    assert!(submitter.submitted.borrow().is_empty());
}

#[test]
fn submission_rejection_is_reported_as_upstream() {
    let prepared =
        prepare_submission(&document(), &target(), &PrepareOptions::default()).expect("prepare");
    let membership = FakeMembership::with_role("userA", "P", "Editor");
    let submitter =
        RecordingSubmitter::failing(CollaboratorError::Rejected("cluster not active".to_string()));

    let err = submit_prepared(prepared, &membership, &submitter).expect_err("rejected");

    assert_eq!(
        err.to_string(),
        "workflow submission failed: cluster not active"
    );
    assert_eq!(submitter.submitted.borrow().len(), 1);
}
