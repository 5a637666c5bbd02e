//! reqwest-backed transports.

use async_trait::async_trait;
use tracing::{debug, trace};

use super::{AsyncTransport, FormRequest, HttpResponse, Transport};
use crate::error::AkinatorError;
use crate::Result;

fn map_error(err: reqwest::Error, request: &FormRequest) -> AkinatorError {
    if err.is_timeout() {
        AkinatorError::Timeout(request.timeout)
    } else {
        AkinatorError::from(err)
    }
}

/// Blocking transport over `reqwest::blocking`.
///
/// Must not be created or dropped from inside an async task.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with its own connection pool.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post(&self, request: &FormRequest) -> Result<HttpResponse> {
        trace!(url = %request.url, fields = request.form.len(), "POST");
        let mut builder = self
            .client
            .post(&request.url)
            .timeout(request.timeout)
            .form(&request.form);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(|e| map_error(e, request))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| map_error(e, request))?;
        debug!(url = %request.url, status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}

/// Async transport over `reqwest`.
#[derive(Debug, Clone)]
pub struct AsyncHttpTransport {
    client: reqwest::Client,
}

impl AsyncHttpTransport {
    /// Create a transport with its own connection pool.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AsyncTransport for AsyncHttpTransport {
    async fn post(&self, request: &FormRequest) -> Result<HttpResponse> {
        trace!(url = %request.url, fields = request.form.len(), "POST");
        let mut builder = self
            .client
            .post(&request.url)
            .timeout(request.timeout)
            .form(&request.form);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| map_error(e, request))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| map_error(e, request))?;
        debug!(url = %request.url, status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}
