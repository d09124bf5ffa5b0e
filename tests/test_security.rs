// Security validation tests
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::json;

use api_ingestion_engine::security::{
    sanitize_api_response, validate_api_request, validate_headers, validate_http_method,
    validate_payload_size, validate_url, ApiRequest, HttpMethod, RateLimitDecision, RateLimiter,
    SecurityError,
};

#[test]
fn test_validate_url_accepts_public_https() {
    assert!(validate_url("https://api.example.com/data").is_ok());
    assert!(validate_url("http://api.example.com:8443/v1/items?page=1").is_ok());
}

#[test]
fn test_validate_url_rejects_empty() {
    assert_eq!(validate_url(""), Err(SecurityError::MissingUrl));
    assert_eq!(validate_url("   "), Err(SecurityError::MissingUrl));
}

#[test]
fn test_validate_url_rejects_malformed() {
    assert_eq!(validate_url("ftp://example.com/data"), Err(SecurityError::InvalidUrlFormat));
    assert_eq!(validate_url("not a url"), Err(SecurityError::InvalidUrlFormat));
    assert_eq!(validate_url("https://"), Err(SecurityError::InvalidUrlFormat));
}

#[test]
fn test_validate_url_rejects_overlong() {
    let url = format!("https://api.example.com/{}", "a".repeat(2100));
    assert_eq!(validate_url(&url), Err(SecurityError::UrlTooLong(url.len())));
}

#[test]
fn test_validate_url_rejects_injection() {
    // Script content, path traversal, javascript: scheme and SQL keywords
    // all report as injection, even though they also fail the grammar
    assert_eq!(
        validate_url("http://x.com/?q=<script>alert(1)</script>"),
        Err(SecurityError::InjectionDetected)
    );
    assert_eq!(
        validate_url("https://example.com/a/../b"),
        Err(SecurityError::InjectionDetected)
    );
    assert_eq!(
        validate_url("javascript:alert(1)"),
        Err(SecurityError::InjectionDetected)
    );
    assert_eq!(
        validate_url("https://example.com/items?q=select"),
        Err(SecurityError::InjectionDetected)
    );
}

#[test]
fn test_validate_url_blocks_private_hosts() {
    for url in [
        "http://localhost/api",
        "http://localhost:3000/api",
        "http://127.0.0.1:8080/status",
        "http://192.168.1.10/admin",
        "http://10.0.0.5/internal",
        "http://172.16.0.9/metrics",
    ] {
        assert_eq!(validate_url(url), Err(SecurityError::PrivateHostBlocked), "{}", url);
    }
}

#[test]
fn test_validate_headers_filters_unknown_names() {
    let mut headers = HashMap::new();
    headers.insert("Authorization".to_string(), "Bearer t".to_string());
    headers.insert("X-Unknown".to_string(), "v".to_string());

    let sanitized = validate_headers(&headers);

    assert_eq!(sanitized.len(), 1);
    assert_eq!(sanitized.get("authorization"), Some(&"Bearer t".to_string()));
}

#[test]
fn test_validate_headers_drops_bad_values() {
    let mut headers = HashMap::new();
    headers.insert("x-api-key".to_string(), "a".repeat(2000));
    headers.insert("x-auth-token".to_string(), "abc<script>alert(1)</script>".to_string());
    headers.insert("user-agent".to_string(), "  preview-bot/1.0  ".to_string());

    let sanitized = validate_headers(&headers);

    assert!(!sanitized.contains_key("x-api-key"));
    assert!(!sanitized.contains_key("x-auth-token"));
    assert_eq!(sanitized.get("user-agent"), Some(&"preview-bot/1.0".to_string()));
}

#[test]
fn test_validate_http_method_defaults_to_get() {
    assert_eq!(validate_http_method(None), Ok(HttpMethod::Get));
    assert_eq!(validate_http_method(Some("")), Ok(HttpMethod::Get));
}

#[test]
fn test_validate_http_method_uppercases_and_rejects() {
    assert_eq!(validate_http_method(Some("post")), Ok(HttpMethod::Post));
    assert_eq!(validate_http_method(Some("Delete")), Ok(HttpMethod::Delete));
    assert!(matches!(
        validate_http_method(Some("TRACE")),
        Err(SecurityError::MethodNotAllowed(_))
    ));
}

#[test]
fn test_validate_payload_size_bounds() {
    assert!(validate_payload_size(None).is_ok());
    assert!(validate_payload_size(Some(&json!({"a": 1}))).is_ok());

    let big = json!({ "data": "x".repeat(1_100_000) });
    assert!(matches!(
        validate_payload_size(Some(&big)),
        Err(SecurityError::PayloadTooLarge(_))
    ));
}

#[test]
fn test_validate_api_request_success_normalizes() {
    let mut headers = HashMap::new();
    headers.insert("Authorization".to_string(), "Bearer t".to_string());
    headers.insert("X-Unknown".to_string(), "v".to_string());

    let request = ApiRequest {
        url: "https://api.example.com/data".to_string(),
        method: Some("post".to_string()),
        headers,
        body: Some(json!({"q": 1})),
    };

    let result = validate_api_request(&request);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());

    let spec = result.sanitized.unwrap();
    assert_eq!(spec.method, HttpMethod::Post);
    assert_eq!(spec.headers.len(), 1);
    assert!(spec.headers.contains_key("authorization"));
    assert_eq!(spec.url, "https://api.example.com/data");
}

#[test]
fn test_validate_api_request_collects_errors() {
    let request = ApiRequest {
        url: "http://localhost/api".to_string(),
        method: Some("TRACE".to_string()),
        headers: HashMap::new(),
        body: None,
    };

    let result = validate_api_request(&request);

    assert!(!result.is_valid);
    assert!(result.sanitized.is_none());
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].starts_with("URL:"));
    assert!(result.errors[1].starts_with("Method:"));
}

#[test]
fn test_sanitize_strips_script_blocks() {
    let sanitized = sanitize_api_response(&json!("<script>alert(1)</script>hello"));
    assert_eq!(sanitized, json!("hello"));
}

#[test]
fn test_sanitize_removes_javascript_and_handlers() {
    assert_eq!(
        sanitize_api_response(&json!("javascript:void(0)")),
        json!("void(0)")
    );
    assert_eq!(
        sanitize_api_response(&json!("a onclick=steal() b")),
        json!("a steal() b")
    );
}

#[test]
fn test_sanitize_escapes_embeddable_tags() {
    let sanitized = sanitize_api_response(&json!("see <iframe src='x'>"));
    assert_eq!(sanitized, json!("see &lt;iframe src='x'>"));
}

#[test]
fn test_sanitize_cleans_object_keys() {
    let sanitized = sanitize_api_response(&json!({"<bad>key": 1, "good": 2}));

    let object = sanitized.as_object().unwrap();
    assert!(object.contains_key("badkey"));
    assert!(object.contains_key("good"));
    assert!(!object.contains_key("<bad>key"));
}

#[test]
fn test_sanitize_drops_overlong_keys() {
    let long_key = "k".repeat(150);
    let mut object = serde_json::Map::new();
    object.insert(long_key.clone(), json!(1));
    object.insert("ok".to_string(), json!(2));

    let sanitized = sanitize_api_response(&serde_json::Value::Object(object));

    let object = sanitized.as_object().unwrap();
    assert!(!object.contains_key(&long_key));
    assert!(object.contains_key("ok"));
}

#[test]
fn test_sanitize_recurses_into_arrays() {
    let sanitized = sanitize_api_response(&json!([
        {"note": "javascript:void(0)"},
        {"note": "plain"},
        42,
    ]));

    assert_eq!(
        sanitized,
        json!([{"note": "void(0)"}, {"note": "plain"}, 42])
    );
}

#[test]
fn test_sanitize_passes_scalars_through() {
    assert_eq!(sanitize_api_response(&json!(42)), json!(42));
    assert_eq!(sanitize_api_response(&json!(true)), json!(true));
    assert_eq!(sanitize_api_response(&json!(null)), json!(null));
}

#[test]
fn test_sanitize_is_idempotent() {
    let inputs = vec![
        json!("<script>alert(1)</script>hello"),
        json!({"<bad>key": 1, "good": "javascript:x", "nested": {"deep": "see <embed x>"}}),
        json!(["a", 1, true, null, {"t": "x onload=run()"}]),
    ];

    for input in inputs {
        let once = sanitize_api_response(&input);
        let twice = sanitize_api_response(&once);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_rate_limiter_enforces_window() {
    let limiter = RateLimiter::new();

    let first = limiter.check("u1", 2, 1000);
    assert!(first.is_allowed());
    assert_eq!(first.remaining(), 1);

    let second = limiter.check("u1", 2, 1000);
    assert!(second.is_allowed());
    assert_eq!(second.remaining(), 0);

    let third = limiter.check("u1", 2, 1000);
    match third {
        RateLimitDecision::Limited { message, reset_at } => {
            assert!(message.contains("Rate limit exceeded"));
            assert!(reset_at > 0);
        },
        RateLimitDecision::Allowed { .. } => panic!("third request should be limited"),
    }
}

#[test]
fn test_rate_limiter_recovers_after_window() {
    let limiter = RateLimiter::new();

    assert!(limiter.check("u2", 1, 200).is_allowed());
    assert!(!limiter.check("u2", 1, 200).is_allowed());

    thread::sleep(Duration::from_millis(250));

    assert!(limiter.check("u2", 1, 200).is_allowed());
}

#[test]
fn test_rate_limiter_isolates_identifiers() {
    let limiter = RateLimiter::new();

    assert!(limiter.check("a", 1, 60_000).is_allowed());
    assert!(limiter.check("b", 1, 60_000).is_allowed());
    assert!(!limiter.check("a", 1, 60_000).is_allowed());
}

#[test]
fn test_rate_limiter_reset_clears_state() {
    let limiter = RateLimiter::new();

    assert!(limiter.check("c", 1, 60_000).is_allowed());
    assert!(!limiter.check("c", 1, 60_000).is_allowed());

    limiter.reset();

    assert!(limiter.check("c", 1, 60_000).is_allowed());
}

#[test]
fn test_rate_limiter_default_bounds() {
    let limiter = RateLimiter::new();

    for expected_remaining in (0..10).rev() {
        let decision = limiter.check_default("d");
        assert!(decision.is_allowed());
        assert_eq!(decision.remaining(), expected_remaining);
    }

    assert!(!limiter.check_default("d").is_allowed());
}

#[test]
fn test_rate_limiter_is_atomic_under_contention() {
    let limiter = Arc::new(RateLimiter::new());
    let mut handles = Vec::new();

    for _ in 0..8 {
        let limiter = limiter.clone();
        handles.push(thread::spawn(move || {
            let mut allowed = 0u32;
            for _ in 0..10 {
                if limiter.check("shared", 20, 60_000).is_allowed() {
                    allowed += 1;
                }
            }
            allowed
        }));
    }

    let total: u32 = handles.into_iter().map(|handle| handle.join().unwrap()).sum();
    assert_eq!(total, 20);
}
