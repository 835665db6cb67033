use std::time::Duration;

/// Failure to obtain a snapshot from a single node.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Unable to parse given server url {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("Connecting to the node failed: {0}")]
    ConnectionFailed(#[source] reqwest::Error),
    #[error("The node did not respond within {0:?}")]
    Timeout(Duration),
    #[error("CockroachDB responded with unexpected status code {0}")]
    UnexpectedStatus(u16),
    #[error("Unable to decode CockroachDB response: {0}")]
    DecodeFailed(#[source] serde_json::Error),
}

/// A [`FetchError`] attributed to the server address it happened for.
#[derive(thiserror::Error, Debug)]
#[error("{endpoint}: {error}")]
pub struct PollError {
    pub endpoint: String,
    #[source]
    pub error: FetchError,
}

impl PollError {
    pub fn new(endpoint: impl Into<String>, error: FetchError) -> Self {
        Self {
            endpoint: endpoint.into(),
            error,
        }
    }
}
