//! Value rules for single properties.

use crate::expr::Expr;
use crate::format::{FormatKind, FormatProfile};
use serde_json::Value;
use toolgram_tool::{PropertySchema, TypeSpec};

/// Element type assumed for enum values without a declared type
const DEFAULT_ENUM_TYPE: &str = "string";

/// Maps property schemas to value rules for one format
#[derive(Debug, Clone, Copy)]
pub struct ValueResolver {
    profile: &'static FormatProfile,
}

impl ValueResolver {
    /// Resolver for `format`
    #[must_use]
    pub fn new(format: FormatKind) -> Self {
        Self {
            profile: format.profile(),
        }
    }

    /// Value rule for `schema`
    ///
    /// `enum` wins over `type`; with neither, or with an unknown type name,
    /// the format's top-level value rule is used.
    #[must_use]
    pub fn resolve(&self, schema: &PropertySchema) -> Expr {
        if let Some(values) = schema.enum_values() {
            return self.resolve_enum(values, schema.type_spec.as_ref());
        }
        match &schema.type_spec {
            Some(spec) => self.resolve_types(spec.names()),
            None => self.any_value(),
        }
    }

    fn any_value(&self) -> Expr {
        Expr::raw(self.profile.top_rule())
    }

    fn resolve_types(&self, names: &[String]) -> Expr {
        if names.is_empty() {
            return self.any_value();
        }
        let rules = names
            .iter()
            .map(|name| match self.profile.type_rule(name) {
                Some(rule) => rule.to_expr(),
                None => {
                    tracing::debug!(
                        type_name = %name,
                        format = %self.profile.kind,
                        "unknown type, using any-value rule"
                    );
                    self.any_value()
                }
            })
            .collect();
        Expr::Choice(rules)
    }

    fn resolve_enum(&self, values: &[Value], declared: Option<&TypeSpec>) -> Expr {
        let declared = declared.map_or(Some(DEFAULT_ENUM_TYPE), TypeSpec::single);
        let literals = values
            .iter()
            .map(|value| {
                let element_type = declared.unwrap_or_else(|| json_type(value));
                self.enum_literal(value, element_type)
            })
            .collect();
        Expr::Choice(literals)
    }

    fn enum_literal(&self, value: &Value, element_type: &str) -> Expr {
        match element_type {
            "boolean" => Expr::literal(self.profile.boolean_literal(is_truthy(value))),
            "null" => Expr::literal(self.profile.null_literal),
            "string" if self.profile.quoted_enum_strings => {
                // The model writes a JSON string, quotes included
                let text = Value::String(self.plain_text(value)).to_string();
                Expr::literal(text)
            }
            _ => Expr::literal(self.plain_text(value)),
        }
    }

    fn plain_text(&self, value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            Value::Bool(b) => self.profile.boolean_literal(*b).to_string(),
            Value::Null => self.profile.null_literal.to_string(),
            other => other.to_string(),
        }
    }
}

/// Value rule for `schema` in `format`
#[must_use]
pub fn resolve(schema: &PropertySchema, format: FormatKind) -> Expr {
    ValueResolver::new(format).resolve(schema)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(schema: &PropertySchema, format: FormatKind) -> String {
        resolve(schema, format).to_string()
    }

    #[test]
    fn test_boolean_enum_per_format() {
        let schema = PropertySchema::enumeration(vec![json!(true), json!(false)]).with_type("boolean");
        assert_eq!(render(&schema, FormatKind::Pythonic), r#"("True" | "False")"#);
        assert_eq!(render(&schema, FormatKind::Json), r#"("true" | "false")"#);
        assert_eq!(render(&schema, FormatKind::Xml), r#"("true" | "false")"#);
    }

    #[test]
    fn test_string_enum_quoting() {
        let schema = PropertySchema::enumeration(vec![json!("celsius"), json!("fahrenheit")])
            .with_type("string");
        assert_eq!(
            render(&schema, FormatKind::Json),
            r#"("\"celsius\"" | "\"fahrenheit\"")"#
        );
        assert_eq!(
            render(&schema, FormatKind::Pythonic),
            r#"("\"celsius\"" | "\"fahrenheit\"")"#
        );
        assert_eq!(render(&schema, FormatKind::Xml), r#"("celsius" | "fahrenheit")"#);
    }

    #[test]
    fn test_enum_without_type_defaults_to_string() {
        let schema = PropertySchema::enumeration(vec![json!("a")]);
        assert_eq!(render(&schema, FormatKind::Json), r#""\"a\"""#);
    }

    #[test]
    fn test_single_enum_unparenthesised() {
        let schema = PropertySchema::enumeration(vec![json!(3)]).with_type("integer");
        assert_eq!(render(&schema, FormatKind::Json), r#""3""#);
    }

    #[test]
    fn test_enum_value_with_quote_is_escaped() {
        let schema = PropertySchema::enumeration(vec![json!("say \"hi\"")]).with_type("string");
        assert_eq!(render(&schema, FormatKind::Json), r#""\"say \\\"hi\\\"\"""#);
        assert_eq!(render(&schema, FormatKind::Xml), r#""say \"hi\"""#);
    }

    #[test]
    fn test_union_enum_infers_element_types() {
        let mut schema = PropertySchema::enumeration(vec![json!("auto"), json!(1), json!(null)]);
        schema.type_spec = Some(TypeSpec::Union(vec!["string".into(), "integer".into(), "null".into()]));
        assert_eq!(
            render(&schema, FormatKind::Pythonic),
            r#"("\"auto\"" | "1" | "None")"#
        );
    }

    #[test]
    fn test_enum_takes_precedence_over_type() {
        let schema = PropertySchema::enumeration(vec![json!("x"), json!("y")]).with_type("string");
        assert!(!render(&schema, FormatKind::Json).contains("basic_string"));
    }

    #[test]
    fn test_type_mapping() {
        assert_eq!(render(&PropertySchema::of_type("string"), FormatKind::Json), "basic_string");
        assert_eq!(render(&PropertySchema::of_type("integer"), FormatKind::Json), "basic_number");
        assert_eq!(render(&PropertySchema::of_type("string"), FormatKind::Xml), "xml_text");
        assert_eq!(
            render(&PropertySchema::of_type("boolean"), FormatKind::Pythonic),
            r#"("True" | "False")"#
        );
        assert_eq!(render(&PropertySchema::of_type("null"), FormatKind::Pythonic), r#""None""#);
        assert_eq!(render(&PropertySchema::of_type("boolean"), FormatKind::Json), "basic_boolean");
    }

    #[test]
    fn test_union_types() {
        let schema = PropertySchema::union(["string", "null"]);
        assert_eq!(render(&schema, FormatKind::Json), "(basic_string | basic_null)");
        assert_eq!(render(&schema, FormatKind::Xml), "(xml_text | basic_null)");
    }

    #[test]
    fn test_unknown_type_falls_back_to_top_rule() {
        assert_eq!(render(&PropertySchema::of_type("uuid"), FormatKind::Json), "json");
        assert_eq!(render(&PropertySchema::of_type("uuid"), FormatKind::Xml), "xml");
        let schema = PropertySchema::union(["uuid", "string"]);
        assert_eq!(render(&schema, FormatKind::Pythonic), "(pythonic | basic_string)");
    }

    #[test]
    fn test_no_enum_no_type() {
        assert_eq!(render(&PropertySchema::default(), FormatKind::Pythonic), "pythonic");
        assert_eq!(render(&PropertySchema::union(Vec::<String>::new()), FormatKind::Json), "json");
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(1)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("false")));
        assert!(!is_truthy(&Value::Null));
    }
}
