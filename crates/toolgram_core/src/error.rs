//! Core error types for toolgram.

/// Core result type
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors raised while composing a grammar.
///
/// Unknown type names and unknown format names are not errors: they degrade
/// to the format's generic value rule and to the `json` profile respectively.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    /// Input rejected before composition started
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Why the input was rejected
        reason: String,
    },

    /// Tool name cannot be embedded in a rule name
    #[error("Invalid tool name {name:?}: {reason}")]
    InvalidToolName {
        /// Offending name
        name: String,
        /// Rule that was violated
        reason: String,
    },

    /// Two tools share a name
    #[error("Duplicate tool: {name}")]
    DuplicateTool {
        /// Name declared more than once
        name: String,
    },

    /// Caller-supplied template is malformed
    #[error("Invalid template {template:?}: {reason}")]
    Template {
        /// Template text as supplied
        template: String,
        /// What is wrong with it
        reason: String,
    },

    /// Tool descriptor could not be decoded
    #[error("Schema error: {message}")]
    Schema {
        /// Decoder message
        message: String,
    },
}

impl ComposeError {
    /// Shorthand for [`ComposeError::InvalidArgument`]
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ComposeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Schema {
            message: err.to_string(),
        }
    }
}
