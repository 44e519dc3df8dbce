use crate::endpoint::{BackendEndpoint, EndpointError};
use crate::graphql::{
    check_status, create_workflow_request, decode_membership, decode_receipt, membership_request,
    GraphqlRequest,
};
use crate::redact::redact_value;
use chaosctl_engine::{
    CollaboratorError, MembershipSnapshot, MembershipSource, SubmissionReceipt, WorkflowSubmitter,
};
use chaosctl_sdk::SubmissionPayload;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

#[derive(Clone, PartialEq, Eq)]
pub struct BackendCredentials {
    pub username: String,
    pub token: String,
}

impl fmt::Debug for BackendCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendCredentials")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Blocking GraphQL client for the chaos backend.
///
/// One instance serves both the membership lookup and the workflow creation.
#[derive(Debug)]
pub struct BackendClient {
    http: Client,
    endpoint: BackendEndpoint,
    credentials: BackendCredentials,
}

impl BackendClient {
    pub fn new(
        endpoint: BackendEndpoint,
        credentials: BackendCredentials,
    ) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(endpoint.timeout_ms))
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }

    pub fn endpoint(&self) -> &BackendEndpoint {
        &self.endpoint
    }

    fn execute(&self, request: &GraphqlRequest) -> Result<String, CollaboratorError> {
        let url = self.endpoint.graphql_url();
        if let Ok(body) = serde_json::to_value(request) {
            debug!(
                %url,
                operation = request.operation_name,
                body = %redact_value(&body),
                "sending graphql request"
            );
        }

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, &self.credentials.token)
            .json(request)
            .send()
            .map_err(|err| CollaboratorError::Transport(describe_transport_error(&err)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| CollaboratorError::Transport(describe_transport_error(&err)))?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => debug!(status, body = %redact_value(&value), "graphql response"),
            Err(_) => debug!(status, bytes = body.len(), "non-json graphql response"),
        }
        check_status(status, &body)?;
        Ok(body)
    }
}

impl MembershipSource for BackendClient {
    fn fetch_membership(&self) -> Result<MembershipSnapshot, CollaboratorError> {
        let body = self.execute(&membership_request(&self.credentials.username))?;
        decode_membership(&body)
    }
}

impl WorkflowSubmitter for BackendClient {
    fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, CollaboratorError> {
        let body = self.execute(&create_workflow_request(payload)?)?;
        decode_receipt(&body)
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("could not connect: {err}")
    } else {
        err.to_string()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
