//! GraphQL documents exchanged with the chaos backend and their decoding.

use chaosctl_engine::{CollaboratorError, MembershipSnapshot, Project, SubmissionReceipt};
use chaosctl_sdk::SubmissionPayload;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MEMBERSHIP_QUERY: &str = "query getUser($username: String!) { getUser(username: $username) { id projects { id name members { user_id user_name role } } } }";

pub const CREATE_WORKFLOW_MUTATION: &str = "mutation createChaosWorkFlow($input: ChaosWorkFlowInput!) { createChaosWorkFlow(input: $input) { workflow_id cluster_id workflow_name } }";

const MEMBERSHIP_FIELD: &str = "getUser";
const CREATE_WORKFLOW_FIELD: &str = "createChaosWorkFlow";
const MAX_BODY_SNIPPET: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    #[serde(rename = "operationName")]
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: String,
    #[serde(default)]
    projects: Option<Vec<Project>>,
}

pub fn membership_request(username: &str) -> GraphqlRequest {
    let mut variables = Map::new();
    variables.insert("username".to_string(), Value::String(username.to_string()));
    GraphqlRequest {
        operation_name: "getUser",
        query: MEMBERSHIP_QUERY,
        variables,
    }
}

pub fn create_workflow_request(
    payload: &SubmissionPayload,
) -> Result<GraphqlRequest, CollaboratorError> {
    let input = serde_json::to_value(payload).map_err(|err| {
        CollaboratorError::Transport(format!("failed to encode workflow input: {err}"))
    })?;
    let mut variables = Map::new();
    variables.insert("input".to_string(), input);
    Ok(GraphqlRequest {
        operation_name: "createChaosWorkFlow",
        query: CREATE_WORKFLOW_MUTATION,
        variables,
    })
}

/// Maps a non-success HTTP status to the matching collaborator error.
pub fn check_status(status: u16, body: &str) -> Result<(), CollaboratorError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(CollaboratorError::Authentication(format!(
            "backend answered HTTP {status}"
        ))),
        _ => Err(CollaboratorError::Transport(format!(
            "backend answered HTTP {status}: {}",
            snippet(body)
        ))),
    }
}

pub fn decode_membership(body: &str) -> Result<MembershipSnapshot, CollaboratorError> {
    let user: UserRecord = decode_field(body, MEMBERSHIP_FIELD)?;
    Ok(MembershipSnapshot {
        user_id: user.id,
        projects: user.projects.unwrap_or_default(),
    })
}

pub fn decode_receipt(body: &str) -> Result<SubmissionReceipt, CollaboratorError> {
    decode_field(body, CREATE_WORKFLOW_FIELD)
}

fn decode_field<T: DeserializeOwned>(body: &str, field: &str) -> Result<T, CollaboratorError> {
    let response: GraphqlResponse = serde_json::from_str(body).map_err(|err| {
        CollaboratorError::Transport(format!("backend response is not GraphQL JSON: {err}"))
    })?;

    let errors = response.errors.unwrap_or_default();
    if !errors.is_empty() {
        let messages = errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CollaboratorError::Rejected(messages));
    }

    let value = response
        .data
        .and_then(|mut data| data.get_mut(field).map(Value::take))
        .filter(|value| !value.is_null())
        .ok_or_else(|| CollaboratorError::Rejected(format!("response has no `{field}` data")))?;

    serde_json::from_value(value)
        .map_err(|err| CollaboratorError::Rejected(format!("unexpected `{field}` shape: {err}")))
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_SNIPPET) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
#[path = "graphql_test.rs"]
mod tests;
