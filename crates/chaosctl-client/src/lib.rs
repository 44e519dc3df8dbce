pub mod client;
pub mod endpoint;
pub mod graphql;
pub mod redact;

pub use client::{BackendClient, BackendCredentials, ClientError};
pub use endpoint::{BackendEndpoint, EndpointError, DEFAULT_REQUEST_TIMEOUT_MS, GRAPHQL_PATH};
pub use graphql::{
    check_status, create_workflow_request, decode_membership, decode_receipt, membership_request,
    GraphqlRequest, CREATE_WORKFLOW_MUTATION, MEMBERSHIP_QUERY,
};
pub use redact::redact_value;
