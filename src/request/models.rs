// Request and response models
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::schema::{ColumnSpec, SchemaInfo};

use super::RequestError;

/// Configuration for a single API request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    pub url: String,
    pub method: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: Option<JsonValue>,
    pub client_id: Option<String>,
}

impl RequestConfig {
    /// Create a GET request configuration for the given URL
    pub fn get<S: Into<String>>(url: S) -> Self {
        RequestConfig {
            url: url.into(),
            method: Some("GET".to_string()),
            headers: HashMap::new(),
            body: None,
            client_id: None,
        }
    }
}

/// Metadata attached to every request result
#[derive(Debug, Clone, Serialize)]
pub struct ResponseMetadata {
    pub url: String,
    pub method: String,
    pub response_time_ms: i64,
    /// ISO-8601 completion timestamp
    pub timestamp: String,
    pub data_type: Option<String>,
    pub record_count: Option<usize>,
    pub rate_limit_remaining: u32,
}

/// Uniform result envelope produced for every API request.
///
/// Failures are reported through this envelope as well; callers never
/// receive a propagated error.
#[derive(Debug, Clone, Serialize)]
pub struct RequestResult {
    pub success: bool,
    pub request_id: String,
    pub error: Option<String>,
    pub data: Option<JsonValue>,
    pub schema: Option<SchemaInfo>,
    pub columns: Vec<ColumnSpec>,
    pub metadata: ResponseMetadata,
}

impl RequestResult {
    /// Build the failure envelope for the given error
    pub fn failure(
        request_id: String,
        error: &RequestError,
        url: &str,
        method: &str,
        response_time_ms: i64,
    ) -> Self {
        RequestResult {
            success: false,
            request_id,
            error: Some(error.to_string()),
            data: None,
            schema: None,
            columns: Vec::new(),
            metadata: ResponseMetadata {
                url: url.to_string(),
                method: method.to_string(),
                response_time_ms,
                timestamp: Utc::now().to_rfc3339(),
                data_type: None,
                record_count: None,
                rate_limit_remaining: 0,
            },
        }
    }
}

/// Result of probing an endpoint for connectivity and data shape
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub success: bool,
    pub message: String,
    pub data_preview: Option<JsonValue>,
    pub schema: Option<SchemaInfo>,
    pub record_count: Option<usize>,
    pub response_time_ms: Option<i64>,
    pub suggestions: Vec<String>,
}
