//! Grammar assembly.
//!
//! Output layout, one rule per line:
//!
//! ```text
//! root ::= ...
//! function_call ::= call_a | call_b
//! call_a ::= ...
//! arguments_a ::= ...
//! (helper rules of arguments_a, if any)
//! ...
//! (format rules and primitive library)
//! ```

use crate::expr::{Expr, Rule};
use crate::format::{FormatKind, FormatProfile};
use crate::options::{ComposeOptions, TemplateOverrides, WrappingConfig};
use crate::ordering::PropertyCombinator;
use crate::primitive::base_grammar;
use crate::template::{Template, CALL_SLOTS, KEY_VALUE_SLOTS};
use crate::value::ValueResolver;
use indexmap::IndexSet;
use serde_json::Value;
use toolgram_core::{escape_literal, ComposeError, ComposeResult};
use toolgram_tool::{PropertySchema, Tool, ToolValidator};

const ROOT_RULE: &str = "root";
const DISPATCH_RULE: &str = "function_call";

/// Composes tool-call grammars
#[derive(Debug, Clone, Default)]
pub struct GrammarComposer {
    options: ComposeOptions,
    validator: ToolValidator,
}

/// Templates resolved for one composition
struct Templates {
    call: Template,
    key_value: Template,
}

impl Templates {
    fn resolve(profile: &FormatProfile, overrides: &TemplateOverrides) -> ComposeResult<Self> {
        let call = overrides.call_rule.as_deref().unwrap_or(profile.call_rule);
        let key_value = overrides
            .key_value_rule
            .as_deref()
            .unwrap_or(profile.key_value_rule);
        Ok(Self {
            call: Template::parse(call, CALL_SLOTS)?,
            key_value: Template::parse(key_value, KEY_VALUE_SLOTS)?,
        })
    }
}

impl GrammarComposer {
    /// Create a composer
    #[must_use]
    pub fn new(options: ComposeOptions) -> Self {
        Self {
            options,
            validator: ToolValidator::default(),
        }
    }

    /// Replace the tool validator
    #[must_use]
    pub fn with_validator(mut self, validator: ToolValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Options in effect
    #[must_use]
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose the grammar text for `tools`
    ///
    /// # Errors
    ///
    /// Returns error if `tools` is empty, a tool fails validation, two tools
    /// share a name, or an override template is malformed
    pub fn compose<'a, I>(&self, tools: I) -> ComposeResult<String>
    where
        I: IntoIterator<Item = &'a Tool>,
    {
        let rules = self.compose_rules(tools)?;
        let mut lines: Vec<String> = rules.iter().map(Rule::to_string).collect();
        lines.push(base_grammar(self.options.format.profile()));
        Ok(lines.join("\n"))
    }

    /// Tool-specific rules, without the shared base grammar
    ///
    /// # Errors
    ///
    /// Same as [`GrammarComposer::compose`]
    pub fn compose_rules<'a, I>(&self, tools: I) -> ComposeResult<Vec<Rule>>
    where
        I: IntoIterator<Item = &'a Tool>,
    {
        let tools: Vec<&Tool> = tools.into_iter().collect();
        if tools.is_empty() {
            return Err(ComposeError::invalid_argument(
                "at least one tool is required to build a call grammar",
            ));
        }

        let mut seen = IndexSet::with_capacity(tools.len());
        for tool in &tools {
            self.validator.validate(tool)?;
            if !seen.insert(tool.name.as_str()) {
                return Err(ComposeError::DuplicateTool {
                    name: tool.name.clone(),
                });
            }
        }

        let profile = self.options.format.profile();
        let templates = Templates::resolve(profile, &self.options.templates)?;
        let resolver = ValueResolver::new(self.options.format);

        let mut rules = vec![
            Rule::new(ROOT_RULE, root_body(&self.options.wrapping)),
            Rule::new(
                DISPATCH_RULE,
                Expr::Alt(
                    tools
                        .iter()
                        .map(|tool| Expr::raw(call_rule_name(&tool.name)))
                        .collect(),
                ),
            ),
        ];
        let mut defined: IndexSet<String> = tools
            .iter()
            .flat_map(|tool| [call_rule_name(&tool.name), arguments_rule_name(&tool.name)])
            .collect();
        for tool in tools {
            rules.extend(self.tool_rules(tool, profile, &templates, &resolver, &mut defined));
        }

        tracing::debug!(
            format = %self.options.format,
            rules = rules.len(),
            "composed tool-call grammar"
        );
        Ok(rules)
    }

    fn tool_rules(
        &self,
        tool: &Tool,
        profile: &FormatProfile,
        templates: &Templates,
        resolver: &ValueResolver,
        defined: &mut IndexSet<String>,
    ) -> Vec<Rule> {
        let key_value = |(key, schema): (&str, &PropertySchema)| {
            let valrule = resolver.resolve(schema).to_string();
            Expr::raw(templates.key_value.render(&[
                ("key", encode_key(profile, key).as_str()),
                ("valrule", valrule.as_str()),
            ]))
        };
        let required: Vec<Expr> = tool.parameters.required_properties().map(key_value).collect();
        let optional: Vec<Expr> = tool.parameters.optional_properties().map(key_value).collect();

        tracing::debug!(
            tool = %tool.name,
            required = required.len(),
            optional = optional.len(),
            "composing tool rules"
        );

        let arguments_name = arguments_rule_name(&tool.name);
        let combinator = PropertyCombinator::new(
            &self.options.key_value_separator,
            self.options.optional_ordering,
        );

        // Helper names derive from the tool name and may hit another tool's rules
        let mut helper_prefix = arguments_name.clone();
        let mut attempt = 0usize;
        let combined = loop {
            let combined = combinator.combine(&helper_prefix, required.clone(), optional.clone());
            if combined.helpers.iter().all(|rule| !defined.contains(&rule.name)) {
                break combined;
            }
            attempt += 1;
            helper_prefix = format!("{}_{}", arguments_name, attempt);
            tracing::debug!(
                tool = %tool.name,
                prefix = %helper_prefix,
                "helper rule name taken, renaming"
            );
        };
        defined.extend(combined.helpers.iter().map(|rule| rule.name.clone()));

        let arguments_body = match profile.arguments_wrapper {
            Some((open, close)) => Expr::Seq(vec![
                Expr::literal(open),
                combined.body,
                Expr::literal(close),
            ]),
            // No wrapper and no properties: match the empty string
            None if combined.body.is_empty() => Expr::literal(""),
            None => combined.body,
        };

        let call_body = templates.call.render(&[
            ("name", escape_literal(&tool.name).as_str()),
            ("arguments_rule", arguments_name.as_str()),
        ]);

        let mut rules = Vec::with_capacity(2 + combined.helpers.len());
        rules.push(Rule::new(call_rule_name(&tool.name), Expr::raw(call_body)));
        rules.push(Rule::new(arguments_name, arguments_body));
        rules.extend(combined.helpers);
        rules
    }
}

fn call_rule_name(tool: &str) -> String {
    format!("call_{}", tool)
}

fn arguments_rule_name(tool: &str) -> String {
    format!("arguments_{}", tool)
}

/// Key text for substitution between the template's literal quotes
fn encode_key(profile: &FormatProfile, key: &str) -> String {
    if profile.json_escaped_keys {
        let encoded = Value::String(key.to_string()).to_string();
        // The template supplies the JSON quotes
        escape_literal(&encoded[1..encoded.len() - 1])
    } else {
        escape_literal(key)
    }
}

/// `root` body: optional per-call wrapping, optional repetition, optional batch wrapping
fn root_body(wrapping: &WrappingConfig) -> Expr {
    let unit = match wrapping.individual_call_tokens() {
        Some((start, end)) => Expr::Seq(vec![
            Expr::literal(start),
            Expr::raw(DISPATCH_RULE),
            Expr::literal(end),
        ]),
        None => Expr::raw(DISPATCH_RULE),
    };

    let pattern = match wrapping.separator() {
        Some(separator) => Expr::Seq(vec![
            unit.clone(),
            Expr::repeat(Expr::Seq(vec![Expr::literal(separator), unit])),
        ]),
        None => unit,
    };

    match wrapping.sequence_tokens() {
        Some((start, end)) => Expr::Seq(vec![
            Expr::literal(start),
            pattern,
            Expr::literal(end),
        ]),
        None => pattern,
    }
}

/// Build the grammar for `tools` in `format`
///
/// # Errors
///
/// See [`GrammarComposer::compose`]
pub fn build_grammar(
    tools: &[Tool],
    format: FormatKind,
    wrapping: &WrappingConfig,
    templates: &TemplateOverrides,
) -> ComposeResult<String> {
    let options = ComposeOptions::new(format)
        .with_wrapping(wrapping.clone())
        .with_templates(templates.clone());
    GrammarComposer::new(options).compose(tools)
}
