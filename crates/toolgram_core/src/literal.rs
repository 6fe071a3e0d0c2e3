//! Quoted string literals inside generated grammar text.
//!
//! Every literal the composer emits (wrapping tokens, separators, enum values,
//! boolean/null spellings, keys and names substituted into templates) is
//! escaped here so that no component can drift to a different convention.

use std::fmt::Write;

/// Escape `text` for use between the double quotes of a grammar literal.
///
/// Backslash and double quote are backslash-escaped, the usual whitespace
/// controls use their short forms and any other control character is written
/// as `\uXXXX`.
#[must_use]
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                // Writing to a String cannot fail
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out
}

/// Render `text` as a complete double-quoted grammar literal.
#[must_use]
pub fn quote_literal(text: &str) -> String {
    format!("\"{}\"", escape_literal(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_literal("get_weather"), "get_weather");
        assert_eq!(quote_literal("("), "\"(\"");
    }

    #[test]
    fn test_escape_quotes_and_backslashes() {
        assert_eq!(escape_literal(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_literal(r"C:\tmp"), r"C:\\tmp");
    }

    #[test]
    fn test_escape_whitespace_controls() {
        assert_eq!(quote_literal("<tool_call>\n"), r#""<tool_call>\n""#);
        assert_eq!(escape_literal("a\tb\r"), r"a\tb\r");
        assert_eq!(escape_literal("\u{1b}"), r"\u001b");
    }

    #[test]
    fn test_quote_wraps_escaped_quotes() {
        // A JSON string value inside a grammar literal
        assert_eq!(quote_literal("\"celsius\""), r#""\"celsius\"""#);
    }

    proptest! {
        #[test]
        fn prop_no_bare_quote_inside_literal(text in any::<String>()) {
            let quoted = quote_literal(&text);
            let inner = &quoted[1..quoted.len() - 1];
            let mut escaped = false;
            for c in inner.chars() {
                if escaped {
                    escaped = false;
                    continue;
                }
                match c {
                    '\\' => escaped = true,
                    '"' => prop_assert!(false, "bare quote in {:?}", quoted),
                    c => prop_assert!(!c.is_control()),
                }
            }
            prop_assert!(!escaped, "dangling backslash in {:?}", quoted);
        }
    }
}
