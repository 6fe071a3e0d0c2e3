//! Composition options.

use crate::format::FormatKind;
use crate::ordering::OptionalOrdering;
use serde::{Deserialize, Serialize};

/// Default separator between key-value pairs
pub const DEFAULT_KEY_VALUE_SEPARATOR: &str = ",";

/// Literal tokens around and between calls
///
/// A start/end pair only applies when both tokens are present and non-empty.
/// The separator applies whenever it is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrappingConfig {
    /// Opens the whole batch of calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_start_token: Option<String>,
    /// Closes the whole batch of calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_end_token: Option<String>,
    /// Opens each call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual_call_start_token: Option<String>,
    /// Closes each call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual_call_end_token: Option<String>,
    /// Between consecutive calls; without it only one call is allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_separator: Option<String>,
}

impl WrappingConfig {
    /// No wrapping, single call
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the whole batch
    #[must_use]
    pub fn with_sequence(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.sequence_start_token = Some(start.into());
        self.sequence_end_token = Some(end.into());
        self
    }

    /// Wrap each call
    #[must_use]
    pub fn with_individual_call(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.individual_call_start_token = Some(start.into());
        self.individual_call_end_token = Some(end.into());
        self
    }

    /// Allow several calls joined by `separator`
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.tool_call_separator = Some(separator.into());
        self
    }

    /// Batch wrapping tokens, if both are set
    #[must_use]
    pub fn sequence_tokens(&self) -> Option<(&str, &str)> {
        pair(&self.sequence_start_token, &self.sequence_end_token)
    }

    /// Per-call wrapping tokens, if both are set
    #[must_use]
    pub fn individual_call_tokens(&self) -> Option<(&str, &str)> {
        pair(
            &self.individual_call_start_token,
            &self.individual_call_end_token,
        )
    }

    /// Separator between calls
    #[must_use]
    pub fn separator(&self) -> Option<&str> {
        self.tool_call_separator.as_deref()
    }
}

fn pair<'a>(start: &'a Option<String>, end: &'a Option<String>) -> Option<(&'a str, &'a str)> {
    match (start.as_deref(), end.as_deref()) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => Some((start, end)),
        _ => None,
    }
}

/// Caller replacements for the format's templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOverrides {
    /// Right-hand side of `call_<name>`, with `{name}` and `{arguments_rule}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_rule: Option<String>,
    /// One argument, with `{key}` and `{valrule}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_value_rule: Option<String>,
}

impl TemplateOverrides {
    /// Use the format's templates
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the call template
    #[must_use]
    pub fn with_call_rule(mut self, template: impl Into<String>) -> Self {
        self.call_rule = Some(template.into());
        self
    }

    /// Replace the key-value template
    #[must_use]
    pub fn with_key_value_rule(mut self, template: impl Into<String>) -> Self {
        self.key_value_rule = Some(template.into());
        self
    }
}

/// Everything that shapes one composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    /// Surface format of the calls
    pub format: FormatKind,
    /// Call wrapping and separation
    pub wrapping: WrappingConfig,
    /// Template replacements
    pub templates: TemplateOverrides,
    /// Literal between key-value pairs
    pub key_value_separator: String,
    /// Arrangement of optional properties
    pub optional_ordering: OptionalOrdering,
}

impl ComposeOptions {
    /// Defaults for `format`
    #[must_use]
    pub fn new(format: FormatKind) -> Self {
        Self {
            format,
            wrapping: WrappingConfig::default(),
            templates: TemplateOverrides::default(),
            key_value_separator: DEFAULT_KEY_VALUE_SEPARATOR.to_string(),
            optional_ordering: OptionalOrdering::default(),
        }
    }

    /// Set wrapping
    #[must_use]
    pub fn with_wrapping(mut self, wrapping: WrappingConfig) -> Self {
        self.wrapping = wrapping;
        self
    }

    /// Set template overrides
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateOverrides) -> Self {
        self.templates = templates;
        self
    }

    /// Set the key-value separator
    #[must_use]
    pub fn with_key_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.key_value_separator = separator.into();
        self
    }

    /// Set optional-property ordering
    #[must_use]
    pub fn with_optional_ordering(mut self, ordering: OptionalOrdering) -> Self {
        self.optional_ordering = ordering;
        self
    }
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self::new(FormatKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_need_both_tokens() {
        let wrapping = WrappingConfig {
            sequence_start_token: Some("<tools>".to_string()),
            ..WrappingConfig::default()
        };
        assert_eq!(wrapping.sequence_tokens(), None);

        let wrapping = WrappingConfig::new().with_sequence("<tools>", "</tools>");
        assert_eq!(wrapping.sequence_tokens(), Some(("<tools>", "</tools>")));
    }

    #[test]
    fn test_empty_tokens_disable_pair() {
        let wrapping = WrappingConfig::new().with_individual_call("", "</call>");
        assert_eq!(wrapping.individual_call_tokens(), None);
    }

    #[test]
    fn test_empty_separator_still_applies() {
        let wrapping = WrappingConfig::new().with_separator("");
        assert_eq!(wrapping.separator(), Some(""));
    }

    #[test]
    fn test_options_defaults() {
        let options = ComposeOptions::default();
        assert_eq!(options.format, FormatKind::Json);
        assert_eq!(options.key_value_separator, ",");
        assert_eq!(options.optional_ordering, OptionalOrdering::Declared);
        assert_eq!(options.wrapping, WrappingConfig::new());
    }

    #[test]
    fn test_options_from_json() {
        let options: ComposeOptions = serde_json::from_str(
            r#"{
                "format": "pythonic",
                "wrapping": {"sequence_start_token": "[", "sequence_end_token": "]", "tool_call_separator": ", "},
                "templates": {"key_value_rule": "\"{key}\" \": \" {valrule}"},
                "optional_ordering": "any_order"
            }"#,
        )
        .unwrap();
        assert_eq!(options.format, FormatKind::Pythonic);
        assert_eq!(options.wrapping.sequence_tokens(), Some(("[", "]")));
        assert_eq!(options.wrapping.separator(), Some(", "));
        assert!(options.templates.key_value_rule.is_some());
        assert_eq!(options.key_value_separator, ",");
        assert_eq!(options.optional_ordering, OptionalOrdering::AnyOrder);
    }

    #[test]
    fn test_options_unknown_format_is_json() {
        let options: ComposeOptions = serde_json::from_str(r#"{"format": "hcl"}"#).unwrap();
        assert_eq!(options.format, FormatKind::Json);
    }
}
