//! XSS detection, HTML escaping and input sanitization.
//!
//! These are regex blacklists, not an HTML parser. They over-flag (any tag at
//! all counts as XSS, including harmless markup) and can miss obfuscated
//! payloads. Callers rely on exactly that profile.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static XSS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<script\b[^>]*>.*?</script\s*>",
        r"(?is)<iframe\b[^>]*>.*?</iframe\s*>",
        r"(?is)<object\b[^>]*>.*?</object\s*>",
        r"(?is)<embed\b[^>]*>.*?</embed\s*>",
        r"(?i)javascript:",
        r"(?i)on\w+\s*=",
        r"<[^>]*>",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("xss pattern compiles"))
    .collect()
});

static ANGLE_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[<>]").expect("pattern compiles"));

static JAVASCRIPT_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("pattern compiles"));

static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on\w+=").expect("pattern compiles"));

/// True when `input` looks like it carries markup or script.
pub fn detect_xss(input: &str) -> bool {
    XSS_PATTERNS.iter().any(|pattern| pattern.is_match(input))
}

/// Replace `& < > " ' /` with HTML entities.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn sanitize_pass(input: &str) -> String {
    let stripped = ANGLE_BRACKETS.replace_all(input, "");
    let stripped = JAVASCRIPT_SCHEME.replace_all(&stripped, "");
    let stripped = EVENT_HANDLER.replace_all(&stripped, "");
    stripped.trim().to_string()
}

/// Strip angle brackets, `javascript:` and `on*=` handlers, then trim.
///
/// Removing one pattern can splice together another (`javajavascript:script:`),
/// so passes repeat until nothing changes. Each pass either shrinks the string
/// or is the last one.
pub fn sanitize_input(input: &str) -> String {
    let mut current = sanitize_pass(input);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// [`escape_html`] for loosely-typed form values; non-strings pass through untouched.
pub fn escape_html_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(&s)),
        other => other,
    }
}

/// [`sanitize_input`] for loosely-typed form values; non-strings pass through untouched.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_input(&s)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_xss_positives() {
        for input in [
            "<script>alert(1)</script>",
            "<SCRIPT type=\"text/javascript\">\nsteal()\n</SCRIPT>",
            "<iframe src=\"//evil\"></iframe>",
            "<object data=x></object>",
            "<embed src=x></embed>",
            "JavaScript:alert(1)",
            "x\" onmouseover=\"alert(1)",
            "x\"onclick=1",
            "monitor=1",
            "donate = 5",
            "<b>bold</b>",
            "<br>",
        ] {
            assert!(detect_xss(input), "expected positive for {input:?}");
        }
    }

    #[test]
    fn test_detect_xss_negatives() {
        for input in ["hello world", "price < 100", "a > b", "tickets: 2", "Concert tonight!"] {
            assert!(!detect_xss(input), "expected negative for {input:?}");
        }
    }

    #[test]
    fn test_escape_html() {
        let escaped = escape_html(r#"<a href="x">&</a>"#);
        assert_eq!(escaped, "&lt;a href=&quot;x&quot;&gt;&amp;&lt;&#x2F;a&gt;");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('"'));
        assert_eq!(escape_html("it's"), "it&#x27;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  <b>hi</b>  "), "bhi/b");
        assert_eq!(sanitize_input("JAVASCRIPT:alert(1)"), "alert(1)");
        assert_eq!(sanitize_input("<img src=x onerror=alert(1)>"), "img src=x alert(1)");
        assert_eq!(sanitize_input("Row 5, Seat 12"), "Row 5, Seat 12");
    }

    #[test]
    fn test_sanitize_strips_handlers_inside_words() {
        assert_eq!(sanitize_input("conclusion=yes"), "cyes");
        assert_eq!(sanitize_input("x\"onclick=1"), "x\"1");
        // Only `on<word>=` with no gap is an attribute to strip.
        assert_eq!(sanitize_input("onclick = 1"), "onclick = 1");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in [
            "javajavascript:script:alert(1)",
            "java<script:alert(1)",
            "<<x>>",
            " on<x=1 ",
            "  onclick= onload=  ",
            "ojavascript:nclick=1",
            "plain text",
            "",
            "   ",
            "\u{00a0}<i>\u{00a0}",
        ] {
            let once = sanitize_input(input);
            assert_eq!(sanitize_input(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_non_strings_pass_through() {
        assert_eq!(escape_html_value(json!(42)), json!(42));
        assert_eq!(sanitize_value(json!(null)), json!(null));
        assert_eq!(sanitize_value(json!(["<b>"])), json!(["<b>"]));
        assert_eq!(escape_html_value(json!("<")), json!("&lt;"));
        assert_eq!(sanitize_value(json!(" <b> ")), json!("b"));
    }
}
