//! check-host.net client
//!
//! Starts an HTTP check against a host from up to [`MAX_NODES`] probe nodes
//! and turns the response into a shareable result link.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::io::{HttpClient, RequestOptions};
use crate::RelayError;

pub const CHECK_HOST_URL: &str = "https://check-host.net";
const CHECK_HTTP_ENDPOINT: &str = "https://check-host.net/check-http";
const CHECK_RESULT_URL: &str = "https://check-host.net/check-result";

pub const MAX_NODES: u32 = 10;

/// Bound on the whole check-host exchange
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wait after a check is accepted so the provider has results to show
/// when the link is opened.
pub const RESULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// check-host rejects requests without a browser-like client identity
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Response to a check request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckHostResponse {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub permanent_link: Option<String>,
}

impl CheckHostResponse {
    /// Pick the best link: permanent link, then a result page built from the
    /// request id, then the check-host homepage.
    pub fn result_link(&self) -> String {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        if let Some(link) = non_empty(&self.permanent_link) {
            return link;
        }
        if let Some(request_id) = non_empty(&self.request_id) {
            return format!("{}/{}", CHECK_RESULT_URL, request_id);
        }
        CHECK_HOST_URL.to_string()
    }
}

/// Build the check-http URL with the host query-escaped
pub fn check_url(host: &str) -> crate::Result<String> {
    let max_nodes = MAX_NODES.to_string();
    let url = reqwest::Url::parse_with_params(
        CHECK_HTTP_ENDPOINT,
        &[("host", host), ("max_nodes", max_nodes.as_str())],
    )
    .map_err(|e| RelayError::Http(format!("building check-host URL: {}", e)))?;
    Ok(url.into())
}

/// Client for starting check-host checks
pub struct CheckHostClient {
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for CheckHostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckHostClient").finish_non_exhaustive()
    }
}

impl CheckHostClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Start a check against `host` and return the result link.
    ///
    /// On success this always waits [`RESULT_SETTLE_DELAY`] before returning.
    pub async fn check(&self, host: &str, proxy_url: Option<&str>) -> crate::Result<String> {
        let proxy = match proxy_url {
            Some(raw) => {
                let parsed = reqwest::Url::parse(raw)
                    .map_err(|e| RelayError::Proxy(format!("{}: {}", raw, e)))?;
                tracing::info!("Using proxy: {}", parsed.origin().ascii_serialization());
                Some(parsed)
            }
            None => None,
        };

        let url = check_url(host)?;
        let options = RequestOptions {
            headers: vec![("Accept", "application/json"), ("User-Agent", USER_AGENT)],
            timeout: Some(REQUEST_TIMEOUT),
            proxy,
        };

        tracing::debug!("Creating check-host check for '{}'", host);
        let response = self.http.get(&url, &options).await?;

        if response.status != 200 {
            return Err(RelayError::CheckHost {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: CheckHostResponse = serde_json::from_str(&response.body)?;
        tracing::debug!(
            "check-host accepted check for '{}': request_id={:?}",
            host,
            parsed.request_id
        );

        tokio::time::sleep(RESULT_SETTLE_DELAY).await;

        Ok(parsed.result_link())
    }
}
