//! Sanitizer functions for text embedded in generated Python source
//!
//! User supplied descriptions end up inside docstrings, string literals and
//! Markdown. Everything that reaches a template passes through one of these
//! helpers first, so the templates themselves never escape anything.

use once_cell::sync::Lazy;
use regex::Regex;

// Smart quotes and dashes that render badly in source files
static UNICODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2013}\u{2014}]")
        .expect("unicode pattern is valid")
});
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

fn normalize(input: &str) -> String {
    let replaced = UNICODE_RE.replace_all(input, |caps: &regex::Captures| match &caps[0] {
        "\u{2018}" | "\u{2019}" => "'",
        "\u{201C}" | "\u{201D}" => "\"",
        _ => "-",
    });
    WS_RE.replace_all(replaced.trim(), " ").into_owned()
}

/// Sanitizes text for the body of a triple-quoted Python docstring
///
/// The result is a single line. Backslashes and double quotes are escaped,
/// which also rules out a premature `"""` terminator.
///
/// # Examples
/// ```
/// use mcp_forge::generation::sanitizers::sanitize_docstring;
///
/// assert_eq!(sanitize_docstring("Say \u{201C}hi\u{201D}\n  twice"), "Say \\\"hi\\\" twice");
/// ```
pub fn sanitize_docstring(input: &str) -> String {
    normalize(input).replace('\\', "\\\\").replace('"', "\\\"")
}

/// Renders text as a double-quoted Python string literal, quotes included
///
/// ```
/// use mcp_forge::generation::sanitizers::python_string_literal;
///
/// assert_eq!(python_string_literal("a\"b"), r#""a\"b""#);
/// assert_eq!(python_string_literal("line\nbreak"), r#""line\nbreak""#);
/// ```
pub fn python_string_literal(input: &str) -> String {
    let mut literal = String::with_capacity(input.len() + 2);
    literal.push('"');
    for ch in input.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c.is_control() => literal.push_str(&format!("\\x{:02x}", c as u32)),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Collapses text onto one line for use inside a Markdown list item
pub fn sanitize_markdown_inline(input: &str) -> String {
    normalize(input).replace('`', "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_docstring() {
        assert_eq!(sanitize_docstring("Add two numbers"), "Add two numbers");
        assert_eq!(sanitize_docstring("Line one\n\nLine two"), "Line one Line two");
        assert_eq!(sanitize_docstring("Path\\to\\file"), "Path\\\\to\\\\file");
        assert_eq!(sanitize_docstring("end\"\"\""), "end\\\"\\\"\\\"");
        assert_eq!(sanitize_docstring("A\u{2014}B"), "A-B");
        assert_eq!(sanitize_docstring("it\u{2019}s"), "it's");
        assert_eq!(sanitize_docstring("   "), "");
    }

    #[test]
    fn test_python_string_literal() {
        assert_eq!(python_string_literal("add"), "\"add\"");
        assert_eq!(python_string_literal(""), "\"\"");
        assert_eq!(python_string_literal("tab\there"), "\"tab\\there\"");
        assert_eq!(python_string_literal("bell\u{7}"), "\"bell\\x07\"");
        assert_eq!(python_string_literal("caf\u{e9}"), "\"caf\u{e9}\"");
        assert_eq!(python_string_literal("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_sanitize_markdown_inline() {
        assert_eq!(
            sanitize_markdown_inline("Uses `code`\nacross lines"),
            "Uses 'code' across lines"
        );
    }
}
