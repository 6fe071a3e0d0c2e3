//! Rule templates with named placeholders.
//!
//! Syntax follows `str.format`-style braces: `{name}` is a placeholder,
//! `{{` and `}}` are literal braces. Only the placeholders a template is
//! declared with are accepted.

use toolgram_core::{ComposeError, ComposeResult};

/// Placeholders of a `call_<name>` template
pub const CALL_SLOTS: &[&str] = &["name", "arguments_rule"];

/// Placeholders of a key-value template
pub const KEY_VALUE_SLOTS: &[&str] = &["key", "valrule"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(String),
}

/// Parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source`, accepting only placeholders listed in `slots`
    ///
    /// # Errors
    ///
    /// Returns error on an unknown placeholder or an unbalanced brace
    pub fn parse(source: &str, slots: &[&str]) -> ComposeResult<Self> {
        let fail = |reason: String| ComposeError::Template {
            template: source.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => return Err(fail(format!("unclosed placeholder {{{}", name))),
                        }
                    }
                    if !slots.contains(&name.as_str()) {
                        return Err(fail(format!(
                            "unknown placeholder {{{}}}, expected one of {:?}",
                            name, slots
                        )));
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Slot(name));
                }
                '}' => return Err(fail("unmatched '}'".to_string())),
                c => text.push(c),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    /// Substitute placeholder values; unbound placeholders render empty
    #[must_use]
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(name) => {
                    if let Some((_, value)) = values.iter().find(|(slot, _)| *slot == name.as_str()) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }
}
