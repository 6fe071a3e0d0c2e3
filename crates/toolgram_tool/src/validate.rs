//! Tool validation before grammar composition.

use crate::error::ToolError;
use crate::schema::Tool;

/// Validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    /// Tool name must be usable inside a rule name
    NameConvention,
    /// Property names must be non-empty
    PropertyNames,
    /// Every required name must be a declared property
    RequiredDeclared,
}

/// Checks tools against a set of enabled rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolValidator {
    /// Enabled validation rules
    rules: Vec<ValidationRule>,
}

impl ToolValidator {
    /// Create a validator with default rules
    ///
    /// `RequiredDeclared` is off: undeclared required names are skipped with a
    /// warning, matching how JSON Schema treats them.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: vec![ValidationRule::NameConvention, ValidationRule::PropertyNames],
        }
    }

    /// Replace the enabled rules
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Enable one more rule
    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    /// Whether `rule` is enabled
    #[must_use]
    pub fn enforces(&self, rule: ValidationRule) -> bool {
        self.rules.contains(&rule)
    }

    /// Validate a tool
    ///
    /// # Errors
    ///
    /// Returns the first violated rule
    pub fn validate(&self, tool: &Tool) -> Result<(), ToolError> {
        if self.enforces(ValidationRule::NameConvention) {
            validate_name(&tool.name)?;
        }

        if self.enforces(ValidationRule::PropertyNames)
            && tool.parameters.properties.contains_key("")
        {
            return Err(ToolError::InvalidProperty {
                tool: tool.name.clone(),
                property: String::new(),
                reason: "property name is empty".to_string(),
            });
        }

        for property in tool.parameters.undeclared_required() {
            if self.enforces(ValidationRule::RequiredDeclared) {
                return Err(ToolError::UndeclaredRequired {
                    tool: tool.name.clone(),
                    property: property.to_string(),
                });
            }
            tracing::warn!(
                tool = %tool.name,
                property,
                "required property is not declared, ignoring"
            );
        }

        Ok(())
    }
}

impl Default for ToolValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Tool names become part of `call_<name>` and `arguments_<name>`
fn validate_name(name: &str) -> Result<(), ToolError> {
    if name.is_empty() {
        return Err(ToolError::InvalidName {
            name: name.to_string(),
            reason: "name is empty".to_string(),
        });
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(ToolError::InvalidName {
            name: name.to_string(),
            reason: format!("contains {:?}", bad),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertySchema;
    use proptest::prelude::*;

    #[test]
    fn test_validate_ok() {
        let validator = ToolValidator::new();
        let tool = Tool::new("get_weather-v2")
            .with_required_property("location", PropertySchema::of_type("string"));
        assert!(validator.validate(&tool).is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let validator = ToolValidator::new();
        let err = validator.validate(&Tool::new("")).unwrap_err();
        assert!(matches!(err, ToolError::InvalidName { .. }));
    }

    #[test]
    fn test_validate_bad_characters() {
        let validator = ToolValidator::new();
        for name in ["get weather", "a\"b", "ns.tool", "call()"] {
            let err = validator.validate(&Tool::new(name)).unwrap_err();
            assert!(matches!(err, ToolError::InvalidName { .. }), "{}", name);
        }
    }

    #[test]
    fn test_validate_empty_property() {
        let validator = ToolValidator::new();
        let tool = Tool::new("t").with_property("", PropertySchema::of_type("string"));
        let err = validator.validate(&tool).unwrap_err();
        assert!(matches!(err, ToolError::InvalidProperty { .. }));
    }

    #[test]
    fn test_undeclared_required_default_allowed() {
        let mut tool = Tool::new("t");
        tool.parameters.required.insert("ghost".to_string());
        assert!(ToolValidator::new().validate(&tool).is_ok());
    }

    #[test]
    fn test_undeclared_required_enforced() {
        let mut tool = Tool::new("t");
        tool.parameters.required.insert("ghost".to_string());
        let validator = ToolValidator::new().with_rule(ValidationRule::RequiredDeclared);
        let err = validator.validate(&tool).unwrap_err();
        assert_eq!(
            err,
            ToolError::UndeclaredRequired {
                tool: "t".to_string(),
                property: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_with_rules_disables_naming() {
        let validator = ToolValidator::new().with_rules(vec![]);
        assert!(validator.validate(&Tool::new("any name at all")).is_ok());
    }

    proptest! {
        #[test]
        fn prop_identifier_names_accepted(name in "[A-Za-z0-9_-]{1,32}") {
            prop_assert!(ToolValidator::new().validate(&Tool::new(name)).is_ok());
        }
    }
}
