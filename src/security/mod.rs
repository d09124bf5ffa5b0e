// Security module for request validation, sanitization and rate limiting
// Author: Gabriel Demetrios Lafis

mod patterns;
mod rate_limit;
mod sanitizer;
mod validator;

pub use patterns::*;
pub use rate_limit::*;
pub use sanitizer::*;
pub use validator::*;

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Maximum accepted URL length in characters
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum accepted header value length in characters
pub const MAX_HEADER_VALUE_LENGTH: usize = 1024;

/// Maximum serialized payload size in bytes (1 MB)
pub const MAX_PAYLOAD_SIZE: usize = 1024 * 1024;

/// Header names that survive validation
pub const ALLOWED_HEADERS: [&str; 6] = [
    "authorization",
    "content-type",
    "accept",
    "user-agent",
    "x-api-key",
    "x-auth-token",
];

/// An HTTP method accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Get the method name as an uppercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request descriptor as supplied by the caller, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiRequest {
    pub url: String,
    pub method: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: Option<JsonValue>,
}

/// A request that passed every validation check.
///
/// The URL passed the safety checks, headers are allow-listed with
/// lower-cased names and injection-free values, and the serialized body
/// is within the payload bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSpec {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<JsonValue>,
}

/// Outcome of validating an [`ApiRequest`]
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub sanitized: Option<RequestSpec>,
}

/// Represents an error in the security module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    MissingUrl,
    UrlTooLong(usize),
    InvalidUrlFormat,
    InjectionDetected,
    PrivateHostBlocked,
    MethodNotAllowed(String),
    PayloadTooLarge(usize),
}

impl fmt::Display for SecurityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SecurityError::MissingUrl => {
                write!(f, "URL is required and must be a non-empty string")
            },
            SecurityError::UrlTooLong(len) => {
                write!(f, "URL is too long ({} characters, max {})", len, MAX_URL_LENGTH)
            },
            SecurityError::InvalidUrlFormat => {
                write!(f, "Invalid URL format. Must be a valid HTTP/HTTPS URL")
            },
            SecurityError::InjectionDetected => {
                write!(f, "URL contains potentially malicious content")
            },
            SecurityError::PrivateHostBlocked => {
                write!(f, "Private/local URLs are not allowed for security reasons")
            },
            SecurityError::MethodNotAllowed(method) => {
                write!(f, "HTTP method {} is not allowed", method)
            },
            SecurityError::PayloadTooLarge(size) => {
                write!(f, "Payload too large ({} bytes, max {})", size, MAX_PAYLOAD_SIZE)
            },
        }
    }
}

impl Error for SecurityError {}
