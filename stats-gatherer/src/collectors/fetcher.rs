use crate::{
    endpoint::Endpoint,
    metrics::Snapshot,
    FetchError,
};
use reqwest::{
    Client as HttpClient,
    StatusCode,
};
use std::{
    future::Future,
    pin::Pin,
    time::Duration,
};
use tokio::time::timeout;

/// Longest wait for the response status line and headers.
pub const RESPONSE_HEADER_TIMEOUT: Duration = Duration::from_secs(3);

/// Longest wait for a whole request, body included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

/// Produces one [`Snapshot`] per call for a node.
pub trait StatusSource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        endpoint: &'a Endpoint,
    ) -> Pin<Box<dyn Future<Output = Result<Snapshot, FetchError>> + Send + 'a>>;
}

/// Reads the node status over HTTP. No retries: a failed fetch is reported and
/// the next collection cycle samples again.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http_client: HttpClient,
    header_timeout: Duration,
    request_timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> eyre::Result<Self> {
        Self::with_timeouts(RESPONSE_HEADER_TIMEOUT, REQUEST_TIMEOUT)
    }

    pub fn with_timeouts(header_timeout: Duration, request_timeout: Duration) -> eyre::Result<Self> {
        let http_client = HttpClient::builder().connect_timeout(header_timeout).build()?;
        Ok(Self {
            http_client,
            header_timeout,
            request_timeout,
        })
    }

    #[instrument(level = "debug", skip_all, fields(endpoint = %endpoint))]
    async fn fetch_status(&self, endpoint: &Endpoint) -> Result<Snapshot, FetchError> {
        timeout(self.request_timeout, self.request(endpoint))
            .await
            .map_err(|_| FetchError::Timeout(self.request_timeout))?
    }

    async fn request(&self, endpoint: &Endpoint) -> Result<Snapshot, FetchError> {
        let url = endpoint.status_url();
        debug!(%url, "Requesting node status");

        let response = timeout(self.header_timeout, self.http_client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout(self.header_timeout))?
            .map_err(|e| self.transport_error(e))?;

        // Successful responses will always return status code 200
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        debug!(bytes = body.len(), "Received node status");

        Snapshot::from_slice(&body)
    }

    fn transport_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.header_timeout)
        } else {
            FetchError::ConnectionFailed(error)
        }
    }
}

impl StatusSource for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        endpoint: &'a Endpoint,
    ) -> Pin<Box<dyn Future<Output = Result<Snapshot, FetchError>> + Send + 'a>> {
        Box::pin(self.fetch_status(endpoint))
    }
}
