// Request validation
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;

use serde_json::Value as JsonValue;
use url::Url;

use super::patterns::{contains_injection, URL_FORMAT};
use super::{
    ApiRequest, HttpMethod, RequestSpec, SecurityError, ValidationResult, ALLOWED_HEADERS,
    MAX_HEADER_VALUE_LENGTH, MAX_PAYLOAD_SIZE, MAX_URL_LENGTH,
};

/// Validate that a URL is safe to fetch.
///
/// The private-host check is a heuristic denylist over literal hostname
/// prefixes: it does not resolve DNS and does not cover IPv6 loopback or
/// the exact RFC1918 ranges (the bare `172.` prefix over-blocks public
/// `172.x` space).
pub fn validate_url(url: &str) -> Result<(), SecurityError> {
    if url.trim().is_empty() {
        return Err(SecurityError::MissingUrl);
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(SecurityError::UrlTooLong(url.len()));
    }

    // Injection patterns are checked before the grammar so a URL carrying
    // script or SQL content is reported as malicious, not merely malformed
    if contains_injection(url) {
        return Err(SecurityError::InjectionDetected);
    }

    if !URL_FORMAT.is_match(url) {
        return Err(SecurityError::InvalidUrlFormat);
    }

    let parsed = Url::parse(url).map_err(|_| SecurityError::InvalidUrlFormat)?;
    let hostname = parsed.host_str().unwrap_or("").to_lowercase();

    if hostname == "localhost"
        || hostname == "127.0.0.1"
        || hostname.starts_with("192.168.")
        || hostname.starts_with("10.")
        || hostname.starts_with("172.")
    {
        return Err(SecurityError::PrivateHostBlocked);
    }

    Ok(())
}

/// Filter request headers down to the allow-listed, injection-free set.
///
/// Never rejects the request: offending headers are dropped, surviving
/// values are trimmed and keyed by lower-cased name.
pub fn validate_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
    let mut sanitized = HashMap::new();

    for (key, value) in headers {
        let lower_key = key.to_lowercase();

        if !ALLOWED_HEADERS.contains(&lower_key.as_str()) {
            continue;
        }

        if value.len() > MAX_HEADER_VALUE_LENGTH {
            continue;
        }

        if contains_injection(value) {
            continue;
        }

        sanitized.insert(lower_key, value.trim().to_string());
    }

    sanitized
}

/// Validate an HTTP method name, defaulting to GET when absent
pub fn validate_http_method(method: Option<&str>) -> Result<HttpMethod, SecurityError> {
    let method = match method {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Ok(HttpMethod::Get),
    };

    match method.to_uppercase().as_str() {
        "GET" => Ok(HttpMethod::Get),
        "POST" => Ok(HttpMethod::Post),
        "PUT" => Ok(HttpMethod::Put),
        "PATCH" => Ok(HttpMethod::Patch),
        "DELETE" => Ok(HttpMethod::Delete),
        _ => Err(SecurityError::MethodNotAllowed(method.to_string())),
    }
}

/// Validate that a serialized request body stays within the payload bound
pub fn validate_payload_size(body: Option<&JsonValue>) -> Result<(), SecurityError> {
    let body = match body {
        Some(value) if !value.is_null() => value,
        _ => return Ok(()),
    };

    let size = serde_json::to_string(body).map(|payload| payload.len()).unwrap_or(0);
    if size > MAX_PAYLOAD_SIZE {
        return Err(SecurityError::PayloadTooLarge(size));
    }

    Ok(())
}

/// Run every request-level check, accumulating human-readable errors.
///
/// URL, method and payload failures block the request; header validation
/// only filters and never blocks.
pub fn validate_api_request(request: &ApiRequest) -> ValidationResult {
    let mut errors = Vec::new();

    if let Err(err) = validate_url(&request.url) {
        errors.push(format!("URL: {}", err));
    }

    let method = match validate_http_method(request.method.as_deref()) {
        Ok(method) => Some(method),
        Err(err) => {
            errors.push(format!("Method: {}", err));
            None
        },
    };

    let headers = validate_headers(&request.headers);

    if let Err(err) = validate_payload_size(request.body.as_ref()) {
        errors.push(format!("Payload: {}", err));
    }

    if !errors.is_empty() {
        return ValidationResult {
            is_valid: false,
            errors,
            sanitized: None,
        };
    }

    ValidationResult {
        is_valid: true,
        errors: Vec::new(),
        sanitized: Some(RequestSpec {
            url: request.url.clone(),
            method: method.unwrap_or(HttpMethod::Get),
            headers,
            body: request.body.clone(),
        }),
    }
}
