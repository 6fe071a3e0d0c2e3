//! Toolgram Tool Descriptors
//!
//! Callable-function descriptions as the grammar composer consumes them:
//! a name plus an ordered property mapping and a required-property set.
//! Property declaration order is preserved end to end.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod schema;
pub mod registry;
pub mod validate;

pub use error::ToolError;
pub use schema::{Parameters, PropertySchema, Tool, TypeSpec};
pub use registry::ToolSet;
pub use validate::{ToolValidator, ValidationRule};
