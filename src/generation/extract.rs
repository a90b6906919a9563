//! Source extraction from free-form model replies

use once_cell::sync::Lazy;
use regex::Regex;

// The info line is optional so single-line fences match too.
static PYTHON_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```python(?:[\w+-]*[ \t]*\n)?(.*?)```").expect("python fence pattern is valid")
});
static ANY_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:[\w+-]*[ \t]*\n)?(.*?)```").expect("fence pattern is valid")
});

/// Pulls source code out of a model reply
///
/// Takes the first ```` ```python ```` block, else the first fenced block of
/// any language, else the whole reply. The result is trimmed.
///
/// ```
/// use mcp_forge::generation::extract::extract_code;
///
/// let reply = "Here you go:\n```python\nprint('hi')\n```\nEnjoy";
/// assert_eq!(extract_code(reply), "print('hi')");
/// ```
pub fn extract_code(reply: &str) -> String {
    let captured = PYTHON_FENCE_RE
        .captures(reply)
        .or_else(|| ANY_FENCE_RE.captures(reply))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(reply);

    captured.trim().to_string()
}
