use crate::FetchError;
use std::fmt;
use url::Url;

/// Admin address of a node started with default flags on this host.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Status resource of the node serving the request.
pub const STATUS_PATH: &str = "/_status/nodes/1";

/// Falls back to [`DEFAULT_ENDPOINT`] when no servers are configured.
pub fn resolve_servers(servers: &[String]) -> Vec<String> {
    if servers.is_empty() {
        vec![DEFAULT_ENDPOINT.to_string()]
    } else {
        servers.to_vec()
    }
}

/// The admin HTTP address of one monitored node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
    authority: String,
}

impl Endpoint {
    pub fn parse(address: &str) -> Result<Self, FetchError> {
        let invalid = |reason: String| FetchError::InvalidAddress {
            address: address.to_string(),
            reason,
        };

        let address = address.trim();
        let url = Url::parse(address).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }

        Ok(Self {
            authority: written_authority(address).to_string(),
            url,
        })
    }

    /// Host and port exactly as configured, scheme-default ports included.
    /// Used as the `server` tag.
    pub fn server_tag(&self) -> String {
        self.authority.clone()
    }

    pub fn status_url(&self) -> Url {
        let mut url = self.url.clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), STATUS_PATH);
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}

/// `host[:port]` of an absolute URL, without user info.
fn written_authority(address: &str) -> &str {
    let rest = address.split_once("://").map_or(address, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    authority.rsplit_once('@').map_or(authority, |(_, host)| host)
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
