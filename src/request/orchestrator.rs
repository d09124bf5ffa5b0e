// Secure API request orchestration
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::error;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value as JsonValue;

use crate::schema::{detect_api_schema, generate_table_columns};
use crate::security::{
    sanitize_api_response, validate_api_request, ApiRequest, RateLimitDecision, RateLimiter,
    RequestSpec,
};
use crate::utils::Config;

use super::{
    HttpResponse, HttpTransport, RequestConfig, RequestError, RequestResult, ReqwestTransport,
    ResponseMetadata, TestResult,
};

/// Outcome of the fetch pipeline before envelope assembly
struct FetchOutcome {
    data: JsonValue,
    spec: RequestSpec,
    rate_limit_remaining: u32,
}

/// Orchestrates rate limiting, validation, fetching, sanitization, schema
/// detection and column projection behind a single entry point.
///
/// Every failure is caught at this boundary and converted into the
/// uniform failure envelope; callers never receive a propagated error.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport + Send + Sync>,
    rate_limiter: Arc<RateLimiter>,
    config: Config,
}

impl ApiClient {
    /// Create a client backed by the reqwest transport
    pub fn new(config: Config) -> Self {
        ApiClient {
            transport: Arc::new(ReqwestTransport::new()),
            rate_limiter: Arc::new(RateLimiter::new()),
            config,
        }
    }

    /// Create a client with an injected transport
    pub fn with_transport<T>(transport: T, config: Config) -> Self
    where
        T: HttpTransport + Send + Sync + 'static,
    {
        ApiClient {
            transport: Arc::new(transport),
            rate_limiter: Arc::new(RateLimiter::new()),
            config,
        }
    }

    /// Get the rate limiter shared by this client
    pub fn rate_limiter(&self) -> Arc<RateLimiter> {
        self.rate_limiter.clone()
    }

    /// Perform a secure API request, returning the uniform envelope
    pub async fn make_api_request(&self, request: RequestConfig) -> RequestResult {
        let request_id = generate_request_id();
        let started = Utc::now().timestamp_millis();

        match self.execute_request(&request).await {
            Ok(outcome) => {
                let schema = detect_api_schema(&outcome.data);
                let columns = generate_table_columns(&schema);
                let data_type = schema.type_name().to_string();

                let record_count = match &outcome.data {
                    JsonValue::Array(items) => items.len(),
                    _ => 1,
                };

                RequestResult {
                    success: true,
                    request_id,
                    error: None,
                    data: Some(outcome.data),
                    schema: Some(schema),
                    columns,
                    metadata: ResponseMetadata {
                        url: outcome.spec.url.clone(),
                        method: outcome.spec.method.as_str().to_string(),
                        response_time_ms: Utc::now().timestamp_millis() - started,
                        timestamp: Utc::now().to_rfc3339(),
                        data_type: Some(data_type),
                        record_count: Some(record_count),
                        rate_limit_remaining: outcome.rate_limit_remaining,
                    },
                }
            },
            Err(err) => {
                let duration = Utc::now().timestamp_millis() - started;

                error!(
                    "API request error [{}]: url={} error={} duration_ms={}",
                    request_id, request.url, err, duration
                );

                let method = request
                    .method
                    .as_deref()
                    .unwrap_or("GET")
                    .to_uppercase();

                RequestResult::failure(request_id, &err, &request.url, &method, duration)
            },
        }
    }

    /// Probe an endpoint with a GET request and summarize the outcome
    pub async fn test_api_endpoint(
        &self,
        url: &str,
        headers: HashMap<String, String>,
    ) -> TestResult {
        let result = self
            .make_api_request(RequestConfig {
                url: url.to_string(),
                method: Some("GET".to_string()),
                headers,
                body: None,
                client_id: Some("test".to_string()),
            })
            .await;

        if result.success {
            let data_preview = result.data.as_ref().map(|data| match data {
                JsonValue::Array(items) => {
                    JsonValue::Array(items.iter().take(3).cloned().collect())
                },
                other => other.clone(),
            });

            TestResult {
                success: true,
                message: "API endpoint is accessible and returns valid data".to_string(),
                data_preview,
                schema: result.schema,
                record_count: result.metadata.record_count,
                response_time_ms: Some(result.metadata.response_time_ms),
                suggestions: Vec::new(),
            }
        } else {
            let message = result
                .error
                .unwrap_or_else(|| "Failed to test API endpoint".to_string());
            let suggestions = error_suggestions(&message);

            TestResult {
                success: false,
                message,
                data_preview: None,
                schema: None,
                record_count: None,
                response_time_ms: None,
                suggestions,
            }
        }
    }

    /// Run the rate-limit, validation, fetch and parse steps
    async fn execute_request(&self, request: &RequestConfig) -> Result<FetchOutcome, RequestError> {
        // Rate limit check, keyed by caller identity
        let client_id = request.client_id.as_deref().unwrap_or("anonymous");
        let decision = self.rate_limiter.check(
            client_id,
            self.config.rate_limit.max_requests,
            self.config.rate_limit.window_ms,
        );

        let rate_limit_remaining = match decision {
            RateLimitDecision::Allowed { remaining } => remaining,
            RateLimitDecision::Limited { message, .. } => {
                return Err(RequestError::RateLimited(message));
            },
        };

        // Validate and normalize the request
        let validation = validate_api_request(&ApiRequest {
            url: request.url.clone(),
            method: request.method.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });

        let spec = match validation.sanitized {
            Some(spec) if validation.is_valid => spec,
            _ => return Err(RequestError::Validation(validation.errors.join(", "))),
        };

        // Fetch under the configured deadline
        let timeout = Duration::from_millis(self.config.client.timeout_ms);
        let response = self.transport.execute(&spec, timeout).await?;

        if !response.is_success() {
            return Err(RequestError::HttpStatus {
                status: response.status,
                status_text: response.status_text.clone(),
            });
        }

        let data = parse_json_body(&response)?;

        Ok(FetchOutcome {
            data: sanitize_api_response(&data),
            spec,
            rate_limit_remaining,
        })
    }
}

/// Decode the response body as JSON, attempting a manual parse when the
/// declared content type is not JSON
fn parse_json_body(response: &HttpResponse) -> Result<JsonValue, RequestError> {
    if response.is_json() {
        serde_json::from_str(&response.body)
            .map_err(|err| RequestError::Parse(format!("Invalid JSON response: {}", err)))
    } else {
        serde_json::from_str(&response.body)
            .map_err(|_| RequestError::Parse("Response is not valid JSON".to_string()))
    }
}

/// Generate a request identifier safe for logging
pub fn generate_request_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();

    format!(
        "req_{}_{}",
        Utc::now().timestamp_millis(),
        suffix.to_lowercase()
    )
}

/// Map an error message to actionable hints via coarse substring matching
fn error_suggestions(error: &str) -> Vec<String> {
    let mut suggestions = Vec::new();

    if error.contains("CORS") {
        suggestions.push(
            "The API does not allow cross-origin requests. Contact the API provider to enable CORS."
                .to_string(),
        );
    }

    if error.contains("401") || error.contains("403") {
        suggestions.push("Check your API key or authentication token.".to_string());
        suggestions.push("Ensure the token has the correct permissions.".to_string());
    }

    if error.contains("404") {
        suggestions.push("Verify the API URL is correct.".to_string());
        suggestions.push("Check the API documentation for the correct endpoint.".to_string());
    }

    if error.contains("timeout") {
        suggestions.push("The API is taking too long to respond. Try again later.".to_string());
        suggestions.push("Check if the API service is operational.".to_string());
    }

    if error.contains("JSON") {
        suggestions.push("The API response is not in JSON format.".to_string());
        suggestions.push("Ensure the endpoint returns JSON data.".to_string());
    }

    if suggestions.is_empty() {
        suggestions.push("Check the API documentation for requirements.".to_string());
        suggestions.push("Verify the URL and authentication details.".to_string());
    }

    suggestions
}
