// Response payload sanitization
// Author: Gabriel Demetrios Lafis

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value as JsonValue};

/// Nesting depth past which values are passed through untouched
const MAX_SANITIZE_DEPTH: usize = 64;

/// Maximum object key length after stripping
const MAX_KEY_LENGTH: usize = 100;

static SCRIPT_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script>").expect("script block pattern is valid")
});

static JAVASCRIPT_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("javascript scheme pattern is valid"));

static EVENT_HANDLERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on\w+\s*=").expect("event handler pattern is valid"));

static EMBED_TAGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(iframe|object|embed|link|meta)").expect("embed tag pattern is valid")
});

/// Characters stripped from object keys
static KEY_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>'"&]"#).expect("key strip pattern is valid"));

/// Neutralize embedded markup in an API response payload.
///
/// Defense in depth against reflected script content, not a full HTML
/// sanitizer: script blocks, `javascript:` occurrences and inline event
/// handlers are removed from strings, the opening bracket of embeddable
/// tags is HTML-escaped, and object keys are stripped of markup
/// characters. Numbers, booleans and null pass through unchanged.
pub fn sanitize_api_response(data: &JsonValue) -> JsonValue {
    sanitize_value(data, 0)
}

fn sanitize_value(data: &JsonValue, depth: usize) -> JsonValue {
    if depth >= MAX_SANITIZE_DEPTH {
        return data.clone();
    }

    match data {
        JsonValue::String(text) => JsonValue::String(sanitize_string(text)),
        JsonValue::Array(items) => JsonValue::Array(
            items.iter().map(|item| sanitize_value(item, depth + 1)).collect(),
        ),
        JsonValue::Object(object) => {
            let mut sanitized = Map::new();

            for (key, value) in object {
                let clean_key = KEY_STRIP.replace_all(key, "").to_string();

                // Keys that vanish entirely or stay suspiciously long are dropped
                if clean_key.is_empty() || clean_key.len() > MAX_KEY_LENGTH {
                    continue;
                }

                sanitized.insert(clean_key, sanitize_value(value, depth + 1));
            }

            JsonValue::Object(sanitized)
        },
        _ => data.clone(),
    }
}

fn sanitize_string(input: &str) -> String {
    let stripped = SCRIPT_BLOCKS.replace_all(input, "");
    let stripped = JAVASCRIPT_SCHEME.replace_all(&stripped, "");
    let stripped = EVENT_HANDLERS.replace_all(&stripped, "");
    let escaped = EMBED_TAGS.replace_all(&stripped, "&lt;$1");

    escaped.trim().to_string()
}
