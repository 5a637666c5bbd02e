//! Transport layer.
//!
//! The game engines only need one capability from the network: post a set
//! of form fields and get the status and body back, bounded by a timeout.
//! [`Transport`] is the blocking form and [`AsyncTransport`] the async one.

mod http;

pub use http::{AsyncHttpTransport, HttpTransport};

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Upper bound on every remote call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// A form-encoded POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    /// Target URL.
    pub url: String,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
    /// Form fields, in send order.
    pub form: Vec<(&'static str, String)>,
    /// Time allowed for the whole exchange.
    pub timeout: Duration,
}

impl FormRequest {
    /// Create a request with no headers or fields.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            form: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a form field.
    pub fn field(mut self, name: &'static str, value: impl ToString) -> Self {
        self.form.push((name, value.to_string()));
        self
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up a form field by name.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

/// Blocking transport.
pub trait Transport: Send + Sync {
    /// Send the request and wait for the reply.
    ///
    /// Any HTTP status is returned as a response; only network failures and
    /// timeouts are errors.
    fn post(&self, request: &FormRequest) -> Result<HttpResponse>;
}

/// Non-blocking transport.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// Send the request and wait for the reply.
    ///
    /// Same contract as [`Transport::post`].
    async fn post(&self, request: &FormRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn post(&self, request: &FormRequest) -> Result<HttpResponse> {
        (**self).post(request)
    }
}

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for std::sync::Arc<T> {
    async fn post(&self, request: &FormRequest) -> Result<HttpResponse> {
        (**self).post(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_request_builder() {
        let request = FormRequest::new("https://en.akinator.com/game")
            .header("user-agent", "test")
            .field("cm", "False")
            .field("sid", 1);

        assert_eq!(request.url, "https://en.akinator.com/game");
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.form_value("cm"), Some("False"));
        assert_eq!(request.form_value("sid"), Some("1"));
        assert_eq!(request.form_value("missing"), None);
        assert_eq!(request.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn test_response_json() {
        let response = HttpResponse::new(200, r#"{"step":"1"}"#);
        assert_eq!(response.json().unwrap()["step"], "1");
        assert!(HttpResponse::new(200, "<html>").json().is_err());
    }
}
