// HTTP transport abstraction and reqwest-backed implementation
// Author: Gabriel Demetrios Lafis

use std::time::Duration;

use async_trait::async_trait;

use crate::security::{HttpMethod, RequestSpec};

use super::RequestError;

/// Default request deadline in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// A raw HTTP response as seen by the orchestrator
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the response declares a JSON content type
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(false, |content_type| content_type.contains("application/json"))
    }
}

/// Performs the outbound HTTP call for a validated request
#[async_trait]
pub trait HttpTransport {
    /// Execute the request, observing the given deadline
    async fn execute(
        &self,
        spec: &RequestSpec,
        timeout: Duration,
    ) -> Result<HttpResponse, RequestError>;
}

/// HTTP transport backed by a shared reqwest client
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client
    pub fn new() -> Self {
        ReqwestTransport {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        spec: &RequestSpec,
        timeout: Duration,
    ) -> Result<HttpResponse, RequestError> {
        let method = match spec.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, spec.url.as_str()).timeout(timeout);

        // JSON content type unless the caller supplied one; header names
        // coming out of validation are already lower-cased
        if !spec.headers.contains_key("content-type") {
            builder = builder.header("Content-Type", "application/json");
        }

        for (name, value) in &spec.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &spec.body {
            let payload = serde_json::to_string(body)
                .map_err(|err| RequestError::Other(err.to_string()))?;
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                RequestError::Timeout(timeout.as_millis() as u64)
            } else {
                RequestError::Network(err.to_string())
            }
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = response
            .text()
            .await
            .map_err(|err| RequestError::Network(err.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            content_type,
            body,
        })
    }
}
