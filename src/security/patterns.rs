// Injection and URL format patterns
// Author: Gabriel Demetrios Lafis

use once_cell::sync::Lazy;
use regex::Regex;

/// Strict URL grammar: http(s) scheme, host, optional port, path, query
/// and fragment with conservative character sets
pub static URL_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:[-\w.])+(?::[0-9]+)?(?:/(?:[\w/_.])*(?:\?(?:[\w&=%.])*)?(?:#(?:[\w.])*)?)?$")
        .expect("URL format pattern is valid")
});

/// Patterns flagging content that must never reach an outbound request.
///
/// This is a heuristic denylist, not a guarantee: it covers SQL keywords,
/// script markup, inline event handlers, shell metacharacters, path
/// traversal and embeddable HTML tags.
pub static INJECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // SQL keywords
        r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|UNION|SCRIPT)\b",
        // Script blocks
        r"(?is)<script\b.*?</script>",
        r"(?i)javascript:",
        // Inline event handlers
        r"(?i)on\w+\s*=",
        // Shell metacharacters
        r"[|;&`]|\$\(|\$\{",
        // Path traversal
        r"\.\./",
        // Embeddable HTML tags
        r"(?i)<(?:iframe|object|embed|link|meta)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("injection pattern is valid"))
    .collect()
});

/// Check whether the input matches any injection pattern
pub fn contains_injection(input: &str) -> bool {
    INJECTION_PATTERNS.iter().any(|pattern| pattern.is_match(input))
}
