//! Grammar expressions and rules.
//!
//! Generated fragments are built as a small tree and rendered once, so
//! spacing and literal quoting are decided in one place.

use std::fmt;
use toolgram_core::quote_literal;

/// Right-hand-side grammar expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Quoted literal; the payload is unescaped text
    Literal(String),
    /// Pre-rendered grammar text (rule references, rendered templates)
    Raw(String),
    /// Concatenation; empty members are skipped
    Seq(Vec<Expr>),
    /// Bare alternation `a | b`
    Alt(Vec<Expr>),
    /// Self-delimiting alternation `(a | b)`, bare when it has one member
    Choice(Vec<Expr>),
    /// `( e )`
    Group(Box<Expr>),
    /// `( e )?`
    Optional(Box<Expr>),
    /// `( e )*`
    Repeat(Box<Expr>),
}

impl Expr {
    /// Quoted literal
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Raw grammar text or rule reference
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    /// The empty expression
    #[must_use]
    pub fn empty() -> Self {
        Self::Seq(Vec::new())
    }

    /// `( e )`
    #[must_use]
    pub fn group(inner: Expr) -> Self {
        Self::Group(Box::new(inner))
    }

    /// `( e )?`
    #[must_use]
    pub fn optional(inner: Expr) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// `( e )*`
    #[must_use]
    pub fn repeat(inner: Expr) -> Self {
        Self::Repeat(Box::new(inner))
    }

    /// Join `items` with a literal separator between neighbours
    #[must_use]
    pub fn separated(items: Vec<Expr>, separator: &str) -> Self {
        let mut parts = Vec::with_capacity(items.len() * 2);
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                parts.push(Self::literal(separator));
            }
            parts.push(item);
        }
        Self::Seq(parts)
    }

    /// Whether this renders to nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(text) => text.is_empty(),
            Self::Seq(items) | Self::Alt(items) | Self::Choice(items) => {
                items.iter().all(Self::is_empty)
            }
            Self::Literal(_) | Self::Group(_) | Self::Optional(_) | Self::Repeat(_) => false,
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str) -> fmt::Result {
    let mut first = true;
    for item in items.iter().filter(|item| !item.is_empty()) {
        if !first {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
        first = false;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(&quote_literal(text)),
            Self::Raw(text) => f.write_str(text),
            Self::Seq(items) => write_joined(f, items, " "),
            Self::Alt(items) => write_joined(f, items, " | "),
            Self::Choice(items) if items.len() > 1 => {
                f.write_str("(")?;
                write_joined(f, items, " | ")?;
                f.write_str(")")
            }
            Self::Choice(items) => write_joined(f, items, " | "),
            Self::Group(inner) => write!(f, "( {} )", inner),
            Self::Optional(inner) => write!(f, "( {} )?", inner),
            Self::Repeat(inner) => write!(f, "( {} )*", inner),
        }
    }
}

/// Named production `name ::= body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Non-terminal name
    pub name: String,
    /// Right-hand side
    pub body: Expr,
}

impl Rule {
    /// Create a rule
    #[must_use]
    pub fn new(name: impl Into<String>, body: Expr) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ::= {}", self.name, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_is_quoted() {
        assert_eq!(Expr::literal("<tools>").to_string(), r#""<tools>""#);
        assert_eq!(Expr::literal("\"").to_string(), r#""\"""#);
    }

    #[test]
    fn test_seq_skips_empty() {
        let expr = Expr::Seq(vec![
            Expr::literal("{"),
            Expr::empty(),
            Expr::literal("}"),
        ]);
        assert_eq!(expr.to_string(), r#""{" "}""#);
    }

    #[test]
    fn test_separated() {
        let expr = Expr::separated(vec![Expr::raw("a"), Expr::raw("b"), Expr::raw("c")], ",");
        assert_eq!(expr.to_string(), r#"a "," b "," c"#);
        assert!(Expr::separated(vec![], ",").is_empty());
    }

    #[test]
    fn test_choice_parenthesised_only_when_plural() {
        let one = Expr::Choice(vec![Expr::literal("x")]);
        assert_eq!(one.to_string(), r#""x""#);
        let two = Expr::Choice(vec![Expr::literal("x"), Expr::literal("y")]);
        assert_eq!(two.to_string(), r#"("x" | "y")"#);
    }

    #[test]
    fn test_wrappers() {
        assert_eq!(Expr::optional(Expr::raw("a")).to_string(), "( a )?");
        assert_eq!(Expr::repeat(Expr::raw("a")).to_string(), "( a )*");
        assert_eq!(Expr::group(Expr::raw("a")).to_string(), "( a )");
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule::new(
            "function_call",
            Expr::Alt(vec![Expr::raw("call_a"), Expr::raw("call_b")]),
        );
        assert_eq!(rule.to_string(), "function_call ::= call_a | call_b");
    }
}
