//! Toolgram Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! Everything that emits a quoted grammar literal goes through [`literal`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod literal;

// Re-exports
pub use error::{ComposeError, ComposeResult};
pub use literal::{escape_literal, quote_literal};
