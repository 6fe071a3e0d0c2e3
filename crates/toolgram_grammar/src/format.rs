//! Surface formats and their profiles.
//!
//! Each [`FormatKind`] owns a static [`FormatProfile`]; adding a format means
//! adding a variant and filling every field of its profile.

use crate::expr::Expr;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surface notation of a function call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FormatKind {
    /// `{"name": "f", "arguments": {...}}`
    #[default]
    Json,
    /// `f(a=1, b="x")`
    Pythonic,
    /// `<function=f>\n<parameter=a>\n1\n</parameter>\n</function>`
    Xml,
}

impl FormatKind {
    /// Every supported format
    pub const ALL: [FormatKind; 3] = [Self::Json, Self::Pythonic, Self::Xml];

    /// Strict lookup by name
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Lookup by name, falling back to `json` for unknown names
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(format = name, "unknown function call format, using json");
            Self::Json
        })
    }

    /// Canonical name; also the name of the format's top-level value rule
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pythonic => "pythonic",
            Self::Xml => "xml",
        }
    }

    /// Templates, literals and base rules for this format
    #[must_use]
    pub fn profile(self) -> &'static FormatProfile {
        match self {
            Self::Json => &JSON,
            Self::Pythonic => &PYTHONIC,
            Self::Xml => &XML,
        }
    }
}

impl From<String> for FormatKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for FormatKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar a JSON Schema type name maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    /// Reference to a named rule
    Rule(&'static str),
    /// Alternation of literal spellings
    Literals(&'static [&'static str]),
}

impl TypeRule {
    /// Expression for use as a value rule
    #[must_use]
    pub fn to_expr(self) -> Expr {
        match self {
            Self::Rule(name) => Expr::raw(name),
            Self::Literals(spellings) => {
                Expr::Choice(spellings.iter().map(|s| Expr::literal(*s)).collect())
            }
        }
    }
}

/// Mapping shared by every format unless overridden
pub const BASE_TYPE_RULES: &[(&str, TypeRule)] = &[
    ("string", TypeRule::Rule("basic_string")),
    ("number", TypeRule::Rule("basic_number")),
    ("integer", TypeRule::Rule("basic_number")),
    ("boolean", TypeRule::Rule("basic_boolean")),
    ("null", TypeRule::Rule("basic_null")),
    ("array", TypeRule::Rule("basic_array")),
    ("object", TypeRule::Rule("basic_object")),
];

/// Everything that differs between surface formats
#[derive(Debug)]
pub struct FormatProfile {
    /// Owning format
    pub kind: FormatKind,
    /// Right-hand side of `call_<name>`; placeholders `{name}`, `{arguments_rule}`
    pub call_rule: &'static str,
    /// Literal tokens around the argument list, if any
    pub arguments_wrapper: Option<(&'static str, &'static str)>,
    /// One argument; placeholders `{key}`, `{valrule}`
    pub key_value_rule: &'static str,
    /// Entries replacing [`BASE_TYPE_RULES`]
    pub type_overrides: &'static [(&'static str, TypeRule)],
    /// Whether string enum values carry JSON-style quotes inside the literal
    pub quoted_enum_strings: bool,
    /// Whether keys land inside JSON string quotes and must be JSON-escaped
    pub json_escaped_keys: bool,
    /// Spelling of true
    pub true_literal: &'static str,
    /// Spelling of false
    pub false_literal: &'static str,
    /// Spelling of null
    pub null_literal: &'static str,
    /// Body of the top-level value rule named after the format
    pub top_rule_body: &'static str,
    /// Body of `basic_any`
    pub any_rule_body: &'static str,
    /// Further format-specific rules
    pub extra_rules: &'static [(&'static str, &'static str)],
}

impl FormatProfile {
    /// Name of the generic "any value" rule of this format
    #[must_use]
    pub fn top_rule(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Type rule after applying this format's overrides
    #[must_use]
    pub fn type_rule(&self, type_name: &str) -> Option<TypeRule> {
        self.type_overrides
            .iter()
            .chain(BASE_TYPE_RULES)
            .find(|(name, _)| *name == type_name)
            .map(|(_, rule)| *rule)
    }

    /// Combined type table, base order first
    #[must_use]
    pub fn type_table(&self) -> IndexMap<&'static str, TypeRule> {
        let mut table: IndexMap<&'static str, TypeRule> = BASE_TYPE_RULES.iter().copied().collect();
        for (name, rule) in self.type_overrides {
            table.insert(*name, *rule);
        }
        table
    }

    /// Spelling of a boolean
    #[must_use]
    pub fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            self.true_literal
        } else {
            self.false_literal
        }
    }
}

static JSON: FormatProfile = FormatProfile {
    kind: FormatKind::Json,
    call_rule: r#""{{" "\"name\"" ":" "\"{name}\"" ", " "\"arguments\"" ":" {arguments_rule} "}}""#,
    arguments_wrapper: Some(("{", "}")),
    key_value_rule: r#""\"{key}\"" ":" {valrule}"#,
    type_overrides: &[],
    quoted_enum_strings: true,
    json_escaped_keys: true,
    true_literal: "true",
    false_literal: "false",
    null_literal: "null",
    top_rule_body: "basic_array | basic_object",
    any_rule_body: "basic_number | basic_string | basic_boolean | basic_null | basic_array | basic_object",
    extra_rules: &[],
};

static PYTHONIC: FormatProfile = FormatProfile {
    kind: FormatKind::Pythonic,
    call_rule: r#""{name}" "(" {arguments_rule} ")""#,
    arguments_wrapper: None,
    key_value_rule: r#""{key}" "=" {valrule}"#,
    type_overrides: &[
        ("boolean", TypeRule::Literals(&["True", "False"])),
        ("null", TypeRule::Literals(&["None"])),
    ],
    quoted_enum_strings: true,
    json_escaped_keys: false,
    true_literal: "True",
    false_literal: "False",
    null_literal: "None",
    top_rule_body: "basic_number | basic_string | basic_array | basic_boolean | basic_null",
    any_rule_body: "basic_number | basic_string | basic_array | basic_object",
    extra_rules: &[],
};

static XML: FormatProfile = FormatProfile {
    kind: FormatKind::Xml,
    call_rule: r#""<function={name}>\n" {arguments_rule} "\n</function>""#,
    arguments_wrapper: None,
    key_value_rule: r#""<parameter={key}>\n" {valrule} "\n</parameter>""#,
    type_overrides: &[("string", TypeRule::Rule("xml_text"))],
    quoted_enum_strings: false,
    json_escaped_keys: false,
    true_literal: "true",
    false_literal: "false",
    null_literal: "null",
    top_rule_body: "xml_element | xml_text",
    any_rule_body: "basic_number | basic_string | basic_boolean | basic_null | basic_array | basic_object",
    extra_rules: &[
        (
            "xml_element",
            "basic_string | basic_number | basic_boolean | basic_null | basic_array | basic_object",
        ),
        ("xml_text", "[^<>]*"),
    ],
};
