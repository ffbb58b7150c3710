//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Per-request transport options for GET requests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: Vec<(&'static str, &'static str)>,
    /// Bound on the whole exchange, connect through body
    pub timeout: Option<Duration>,
    /// Proxy used for this request only
    pub proxy: Option<reqwest::Url>,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request to the given URL
    async fn get(&self, url: &str, options: &RequestOptions) -> crate::Result<HttpResponse>;

    /// Send a POST request with a JSON body
    async fn post_json(&self, url: &str, body: &serde_json::Value)
        -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// The shared client, or a one-off client when the request needs a proxy
    fn client_for(&self, options: &RequestOptions) -> crate::Result<reqwest::Client> {
        let Some(proxy_url) = &options.proxy else {
            return Ok(self.client.clone());
        };

        let proxy = reqwest::Proxy::all(proxy_url.clone())
            .map_err(|e| crate::RelayError::Proxy(e.to_string()))?;
        reqwest::Client::builder()
            .proxy(proxy)
            .build()
            .map_err(|e| crate::RelayError::Proxy(e.to_string()))
    }
}

/// Scheme and host only; request paths may carry credentials
fn origin(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.origin().ascii_serialization(),
        Err(_) => "<invalid url>".to_string(),
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, options: &RequestOptions) -> crate::Result<HttpResponse> {
        tracing::debug!("GET {}", url);
        let mut request = self.client_for(options)?.get(url);
        for (name, value) in &options.headers {
            request = request.header(*name, *value);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| crate::RelayError::Http(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::RelayError::Http(format!("Reading response body: {}", e)))?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> crate::Result<HttpResponse> {
        let origin = origin(url);
        tracing::debug!("POST {}", origin);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                crate::RelayError::Http(format!("POST {} failed: {}", origin, e.without_url()))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::RelayError::Http(format!("Reading response body: {}", e)))?;

        tracing::debug!("POST {} -> {} ({} bytes)", origin, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
