//! Test doubles shared by the step definitions

use std::sync::{Arc, Mutex};

use checkhost_relay::checkhost::CheckHostClient;
use checkhost_relay::dispatcher::Dispatcher;
use checkhost_relay::io::{HttpClient, HttpResponse, RequestOptions};
use checkhost_relay::notifier::Notifier;
use checkhost_relay::telegram::TelegramNotifier;
use checkhost_relay::{Config, RelayError};

pub const TEST_TOKEN: &str = "123456:TEST";
pub const TEST_CHAT: &str = "-100777";

/// Canned answer for one provider
#[derive(Debug, Clone)]
pub enum Reply {
    Respond { status: u16, body: String },
    Fail(String),
}

impl Reply {
    fn to_result(&self) -> checkhost_relay::Result<HttpResponse> {
        match self {
            Reply::Respond { status, body } => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Reply::Fail(msg) => Err(RelayError::Http(msg.clone())),
        }
    }
}

/// A recorded outbound request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub proxy: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// An HTTP client standing in for both check-host and Telegram
#[derive(Debug)]
pub struct FakeHttpClient {
    pub check_host_reply: Mutex<Reply>,
    pub telegram_reply: Mutex<Reply>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl Default for FakeHttpClient {
    fn default() -> Self {
        Self {
            check_host_reply: Mutex::new(Reply::Respond {
                status: 200,
                body: r#"{"ok":1,"request_id":"default"}"#.to_string(),
            }),
            telegram_reply: Mutex::new(Reply::Respond {
                status: 200,
                body: r#"{"ok":true}"#.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeHttpClient {
    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl HttpClient for FakeHttpClient {
    async fn get(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> checkhost_relay::Result<HttpResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            proxy: options.proxy.as_ref().map(|u| u.to_string()),
            body: None,
        });
        self.check_host_reply.lock().unwrap().to_result()
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> checkhost_relay::Result<HttpResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "POST".to_string(),
            url: url.to_string(),
            proxy: None,
            body: Some(body.clone()),
        });
        self.telegram_reply.lock().unwrap().to_result()
    }
}

pub fn test_config(proxy_url: Option<String>) -> Config {
    Config {
        port: 8080,
        telegram_token: TEST_TOKEN.to_string(),
        telegram_chat: TEST_CHAT.to_string(),
        telegram_base: "https://api.telegram.org/bot".to_string(),
        proxy_url,
    }
}

/// A dispatcher wired to the fake client, exactly as the service wires it
pub fn build_dispatcher(http: &Arc<FakeHttpClient>, proxy_url: Option<String>) -> Dispatcher {
    let config = Arc::new(test_config(proxy_url));
    let http: Arc<dyn HttpClient> = Arc::clone(http) as Arc<dyn HttpClient>;
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(&config, Arc::clone(&http)));
    Dispatcher::new(config, CheckHostClient::new(http), notifier)
}
