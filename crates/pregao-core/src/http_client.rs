//! HTTP transport abstraction for provider adapters.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// Default per-request timeout. A timed-out provider call is a failed
/// attempt, never a fatal error.
pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// HTTP request envelope used by adapter transport calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Explicit per-request timeout. `None` defers to the transport's
    /// configured default.
    pub timeout_ms: Option<u64>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// HTTP response envelope returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
    timed_out: bool,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn timed_out(&self) -> bool {
        self.timed_out
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Adapter transport contract.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
    default_timeout_ms: u64,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::with_timeout_ms(DEFAULT_TIMEOUT_MS)
    }

    /// Transport whose requests time out after `timeout_ms` unless a request
    /// carries its own explicit timeout.
    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent("pregao/0.1.0")
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
            default_timeout_ms: timeout_ms,
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self.client.get(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let timeout_ms = request.timeout_ms.unwrap_or(self.default_timeout_ms);
            builder = builder.timeout(std::time::Duration::from_millis(timeout_ms));

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::timeout(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    HttpError::new(format!("connection failed: {e}"))
                } else {
                    HttpError::new(format!("request failed: {e}"))
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::new(format!("failed to read response body: {e}")))?;

            Ok(HttpResponse { status, body })
        })
    }
}

/// Deterministic offline transport: serves a queue of canned responses and
/// records every request URL. Used by adapter tests.
#[derive(Debug, Default)]
pub struct CannedHttpClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<String>>,
}

impl CannedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: HttpResponse) {
        self.responses
            .lock()
            .expect("canned responses lock is not poisoned")
            .push(Ok(response));
    }

    pub fn push_error(&self, error: HttpError) {
        self.responses
            .lock()
            .expect("canned responses lock is not poisoned")
            .push(Err(error));
    }

    pub fn seen_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("canned requests lock is not poisoned")
            .clone()
    }
}

impl HttpClient for CannedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("canned requests lock is not poisoned")
                .push(request.url);

            let mut responses = self
                .responses
                .lock()
                .expect("canned responses lock is not poisoned");
            if responses.is_empty() {
                return Err(HttpError::new("no canned response queued"));
            }
            responses.remove(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_request_timeout_is_never_conflated_with_the_default() {
        // An unset timeout defers to the transport default; an explicit one
        // is preserved even when it equals that default numerically.
        assert_eq!(HttpRequest::get("https://vendor.test").timeout_ms, None);
        assert_eq!(
            HttpRequest::get("https://vendor.test")
                .with_timeout_ms(DEFAULT_TIMEOUT_MS)
                .timeout_ms,
            Some(DEFAULT_TIMEOUT_MS)
        );
    }

    #[tokio::test]
    async fn canned_client_serves_responses_in_order() {
        let client = CannedHttpClient::new();
        client.push_response(HttpResponse::ok_json("{\"a\":1}"));
        client.push_error(HttpError::timeout("slow vendor"));

        let first = client
            .execute(HttpRequest::get("https://vendor.test/one"))
            .await
            .expect("first response is canned ok");
        assert_eq!(first.body, "{\"a\":1}");

        let second = client
            .execute(HttpRequest::get("https://vendor.test/two"))
            .await
            .expect_err("second response is a canned error");
        assert!(second.timed_out());

        assert_eq!(
            client.seen_urls(),
            vec![
                "https://vendor.test/one".to_string(),
                "https://vendor.test/two".to_string()
            ]
        );
    }
}
