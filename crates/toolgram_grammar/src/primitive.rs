//! Primitive grammar library shared by every format.

use crate::expr::{Expr, Rule};
use crate::format::FormatProfile;

/// Leaf rules referenced by every generated grammar.
///
/// `basic_any`, `basic_boolean` and `basic_null` are supplied per format by
/// [`base_grammar`] because their spellings differ.
pub const PRIMITIVE_GRAMMAR: &str = r#"basic_string ::= (([\"] basic_string_1 [\"]))
basic_string_1 ::= "" | [^"\\\x00-\x1F] basic_string_1 | "\\" escape basic_string_1
escape ::= ["\\/bfnrt] | "u" [A-Fa-f0-9]{4}
basic_integer ::= ("0" | "-"? [1-9] [0-9]*) ".0"?
basic_number ::= ("0" | "-"? [1-9] [0-9]*) ("." [0-9]+)? ([eE] [+-]? [0-9]+)?
basic_array ::= "[" ("" | ws basic_any (ws "," ws basic_any)*) ws "]"
basic_object ::= "{" ("" | ws basic_string ws ":" ws basic_any ( ws "," ws basic_string ws ":" ws basic_any)*) ws "}"
ws ::= [ \n\t]*"#;

/// Format-specific rules for `profile`, in emission order
#[must_use]
pub fn format_rules(profile: &FormatProfile) -> Vec<Rule> {
    let mut rules = vec![
        Rule::new(profile.top_rule(), Expr::raw(profile.top_rule_body)),
        Rule::new("basic_any", Expr::raw(profile.any_rule_body)),
    ];
    rules.extend(
        profile
            .extra_rules
            .iter()
            .map(|(name, body)| Rule::new(*name, Expr::raw(*body))),
    );
    rules.push(Rule::new(
        "basic_boolean",
        Expr::Alt(vec![
            Expr::literal(profile.true_literal),
            Expr::literal(profile.false_literal),
        ]),
    ));
    rules.push(Rule::new("basic_null", Expr::literal(profile.null_literal)));
    rules
}

/// Format rules followed by [`PRIMITIVE_GRAMMAR`]
#[must_use]
pub fn base_grammar(profile: &FormatProfile) -> String {
    let mut lines: Vec<String> = format_rules(profile).iter().map(Rule::to_string).collect();
    lines.push(PRIMITIVE_GRAMMAR.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatKind;

    #[test]
    fn test_json_base_grammar() {
        let text = base_grammar(FormatKind::Json.profile());
        assert!(text.starts_with("json ::= basic_array | basic_object\n"));
        assert!(text.contains(r#"basic_boolean ::= "true" | "false""#));
        assert!(text.contains(r#"basic_null ::= "null""#));
        assert!(text.ends_with(PRIMITIVE_GRAMMAR));
    }

    #[test]
    fn test_pythonic_spellings() {
        let text = base_grammar(FormatKind::Pythonic.profile());
        assert!(text.starts_with("pythonic ::= "));
        assert!(text.contains(r#"basic_boolean ::= "True" | "False""#));
        assert!(text.contains(r#"basic_null ::= "None""#));
        assert!(!text.contains(r#""true""#));
    }

    #[test]
    fn test_xml_extra_rules() {
        let rules = format_rules(FormatKind::Xml.profile());
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["xml", "basic_any", "xml_element", "xml_text", "basic_boolean", "basic_null"]
        );
        assert_eq!(rules[3].to_string(), "xml_text ::= [^<>]*");
    }

    #[test]
    fn test_every_referenced_leaf_is_defined() {
        for kind in FormatKind::ALL {
            let text = base_grammar(kind.profile());
            for leaf in [
                "basic_string ::=",
                "basic_number ::=",
                "basic_array ::=",
                "basic_object ::=",
                "basic_any ::=",
                "basic_boolean ::=",
                "basic_null ::=",
                "ws ::=",
            ] {
                assert!(text.contains(leaf), "{} missing {}", kind, leaf);
            }
        }
    }
}
