use super::{BackendClient, BackendCredentials};
use crate::endpoint::BackendEndpoint;
use chaosctl_engine::{CollaboratorError, MembershipSource};

fn credentials() -> BackendCredentials {
    BackendCredentials {
        username: "admin".to_string(),
        token: "super-secret-token".to_string(),
    }
}

#[test]
fn debug_output_hides_token() {
    let rendered = format!("{:?}", credentials());
    assert!(rendered.contains("admin"));
    assert!(!rendered.contains("super-secret-token"));
}

#[test]
fn client_keeps_endpoint() {
    let endpoint = BackendEndpoint::new("http://127.0.0.1:9").expect("endpoint");
    let client = BackendClient::new(endpoint.clone(), credentials()).expect("client");
    assert_eq!(client.endpoint(), &endpoint);
    assert!(!format!("{client:?}").contains("super-secret-token"));
}

#[test]
fn unreachable_backend_is_a_transport_failure() {
    let endpoint = BackendEndpoint::new("http://127.0.0.1:9")
        .expect("endpoint")
        .with_timeout_ms(2_000)
        .expect("timeout");
    let client = BackendClient::new(endpoint, credentials()).expect("client");
    let err = client.fetch_membership().expect_err("nothing listens on port 9");
    assert!(matches!(err, CollaboratorError::Transport(_)));
}
