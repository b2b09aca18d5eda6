//! Shared helper functions for CLI commands

use serde_json::Value;

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Parse a `key=value` assignment.
///
/// The value is taken as JSON when it parses as JSON, otherwise as a bare
/// string, so `--set archived=true` and `--set name=Widget` both do what
/// they look like.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty key in assignment '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_parse_assignment_string_and_json() {
        assert_eq!(
            parse_assignment("name=Widget").unwrap(),
            ("name".to_string(), json!("Widget"))
        );
        assert_eq!(
            parse_assignment("archived=true").unwrap(),
            ("archived".to_string(), json!(true))
        );
        assert_eq!(
            parse_assignment("qty=3").unwrap(),
            ("qty".to_string(), json!(3))
        );
    }

    #[test]
    fn test_parse_assignment_keeps_extra_equals() {
        assert_eq!(
            parse_assignment("note=a=b").unwrap(),
            ("note".to_string(), json!("a=b"))
        );
    }

    #[test]
    fn test_parse_assignment_rejects_malformed() {
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }
}
