//! Property ordering combinator.
//!
//! Turns the rendered key-value fragments of a tool into the body of its
//! arguments rule. Required fragments always come first, in declaration
//! order, joined by the separator. What follows depends on
//! [`OptionalOrdering`]:
//!
//! - [`OptionalOrdering::Declared`] builds one alternative per starting
//!   optional property `i`: fragment `i`, then every later fragment `j > i`
//!   wrapped as `( sep fragment_j )?`. The result accepts any subset of the
//!   optional properties that keeps declaration order.
//! - [`OptionalOrdering::AnyOrder`] accepts any subset in any order. It needs
//!   one helper rule per non-empty subset, so it is capped at
//!   [`MAX_ANY_ORDER_OPTIONALS`] optional properties.

use crate::expr::{Expr, Rule};
use serde::{Deserialize, Serialize};

/// Upper bound on optional properties for [`OptionalOrdering::AnyOrder`]
pub const MAX_ANY_ORDER_OPTIONALS: usize = 8;

/// How optional properties may be arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalOrdering {
    /// Any subset, in declaration order
    #[default]
    Declared,
    /// Any subset, in any order
    AnyOrder,
}

/// Arguments body plus any helper rules it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combined {
    /// Body of the arguments rule, before format wrapping
    pub body: Expr,
    /// Rules referenced from `body`, emitted after the arguments rule
    pub helpers: Vec<Rule>,
}

impl Combined {
    fn inline(body: Expr) -> Self {
        Self {
            body,
            helpers: Vec::new(),
        }
    }
}

/// Combines required and optional key-value fragments
#[derive(Debug, Clone, Copy)]
pub struct PropertyCombinator<'a> {
    separator: &'a str,
    ordering: OptionalOrdering,
}

impl<'a> PropertyCombinator<'a> {
    /// Create a combinator joining fragments with the literal `separator`
    #[must_use]
    pub fn new(separator: &'a str, ordering: OptionalOrdering) -> Self {
        Self {
            separator,
            ordering,
        }
    }

    /// Combine fragments; `rule_prefix` names any helper rules
    #[must_use]
    pub fn combine(&self, rule_prefix: &str, required: Vec<Expr>, optional: Vec<Expr>) -> Combined {
        match self.ordering {
            OptionalOrdering::Declared => {
                Combined::inline(combine_declared(required, optional, self.separator))
            }
            OptionalOrdering::AnyOrder if optional.len() > MAX_ANY_ORDER_OPTIONALS => {
                tracing::warn!(
                    rule = rule_prefix,
                    optional = optional.len(),
                    limit = MAX_ANY_ORDER_OPTIONALS,
                    "too many optional properties for any-order grammar, using declared order"
                );
                Combined::inline(combine_declared(required, optional, self.separator))
            }
            OptionalOrdering::AnyOrder => {
                combine_any_order(rule_prefix, required, optional, self.separator)
            }
        }
    }
}

/// Declared-order combination; needs no helper rules
#[must_use]
pub fn combine_declared(required: Vec<Expr>, optional: Vec<Expr>, separator: &str) -> Expr {
    if optional.is_empty() {
        return Expr::separated(required, separator);
    }

    let alternatives = (0..optional.len())
        .map(|i| {
            let mut parts = vec![optional[i].clone()];
            parts.extend(optional[i + 1..].iter().map(|later| {
                Expr::optional(Expr::Seq(vec![Expr::literal(separator), later.clone()]))
            }));
            Expr::Seq(parts)
        })
        .collect();
    let alternation = Expr::Alt(alternatives);

    if required.is_empty() {
        Expr::optional(alternation)
    } else {
        gated_tail(required, alternation, separator)
    }
}

/// `required-chain ( sep tail )?`
fn gated_tail(required: Vec<Expr>, tail: Expr, separator: &str) -> Expr {
    let tail = match tail {
        Expr::Raw(_) => tail,
        other => Expr::group(other),
    };
    Expr::Seq(vec![
        Expr::separated(required, separator),
        Expr::optional(Expr::Seq(vec![Expr::literal(separator), tail])),
    ])
}

fn combine_any_order(
    rule_prefix: &str,
    required: Vec<Expr>,
    optional: Vec<Expr>,
    separator: &str,
) -> Combined {
    if optional.is_empty() {
        return Combined::inline(Expr::separated(required, separator));
    }

    let subset_rule = |mask: usize| format!("{}_opt_{:x}", rule_prefix, mask);
    let full = (1usize << optional.len()) - 1;

    // Rule for subset S: pick any member next, then optionally continue with S minus it
    let helpers = (1..=full)
        .rev()
        .map(|mask| {
            let alternatives = (0..optional.len())
                .filter(|&i| mask & (1usize << i) != 0)
                .map(|i| {
                    let rest = mask & !(1usize << i);
                    if rest == 0 {
                        optional[i].clone()
                    } else {
                        Expr::Seq(vec![
                            optional[i].clone(),
                            Expr::optional(Expr::Seq(vec![
                                Expr::literal(separator),
                                Expr::raw(subset_rule(rest)),
                            ])),
                        ])
                    }
                })
                .collect();
            Rule::new(subset_rule(mask), Expr::Alt(alternatives))
        })
        .collect();

    let entry = Expr::raw(subset_rule(full));
    let body = if required.is_empty() {
        Expr::optional(entry)
    } else {
        gated_tail(required, entry, separator)
    };
    Combined { body, helpers }
}
