//! Toolgram Grammar Composer
//!
//! Builds EBNF grammars that constrain a language model to emit calls to a
//! given set of tools. Three surface formats are supported:
//!
//! - `json`: `{"name": "f", "arguments": {...}}`
//! - `pythonic`: `f(a=1, b="x")`
//! - `xml`: `<function=f>` with one `<parameter=...>` block per argument
//!
//! The entry point is [`GrammarComposer`] (or [`build_grammar`] for the
//! common case). Output is plain grammar text for an external engine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod composer;
pub mod expr;
pub mod format;
pub mod options;
pub mod ordering;
pub mod primitive;
pub mod template;
pub mod value;

pub use composer::{build_grammar, GrammarComposer};
pub use expr::{Expr, Rule};
pub use format::{FormatKind, FormatProfile, TypeRule};
pub use options::{ComposeOptions, TemplateOverrides, WrappingConfig};
pub use ordering::{OptionalOrdering, PropertyCombinator, MAX_ANY_ORDER_OPTIONALS};
pub use primitive::{base_grammar, PRIMITIVE_GRAMMAR};
pub use value::ValueResolver;

pub use toolgram_core::{ComposeError, ComposeResult};
pub use toolgram_tool::{PropertySchema, Tool, ToolSet};
