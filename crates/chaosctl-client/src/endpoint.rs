use serde::{Deserialize, Serialize};

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const GRAPHQL_PATH: &str = "/api/query";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendEndpoint {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl BackendEndpoint {
    pub fn new(base_url: impl Into<String>) -> Result<Self, EndpointError> {
        let endpoint = Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        };
        endpoint.validate()?;
        Ok(endpoint)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, EndpointError> {
        self.timeout_ms = timeout_ms;
        self.validate()?;
        Ok(self)
    }

    pub fn graphql_url(&self) -> String {
        format!("{}{GRAPHQL_PATH}", self.base_url.trim_end_matches('/'))
    }

    fn validate(&self) -> Result<(), EndpointError> {
        let rest = self
            .base_url
            .strip_prefix("https://")
            .or_else(|| self.base_url.strip_prefix("http://"));
        match rest {
            Some(host) if !host.trim_matches('/').is_empty() => {}
            _ => return Err(EndpointError::InvalidUrl(self.base_url.clone())),
        }
        if self.timeout_ms == 0 {
            return Err(EndpointError::InvalidTimeout(self.timeout_ms));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid endpoint url, expected http(s): {0}")]
    InvalidUrl(String),
    #[error("invalid timeout_ms, expected > 0: {0}")]
    InvalidTimeout(u64),
}

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod tests;
