//! Errors raised while building or validating tool descriptors.

use toolgram_core::ComposeError;

/// Error from tool descriptor operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// Tool name violates the naming convention
    #[error("Invalid tool name {name:?}: {reason}")]
    InvalidName {
        /// Offending name
        name: String,
        /// Rule that was violated
        reason: String,
    },

    /// Property name violates the naming convention
    #[error("Invalid property {property:?} on tool {tool}: {reason}")]
    InvalidProperty {
        /// Owning tool
        tool: String,
        /// Offending property name
        property: String,
        /// Rule that was violated
        reason: String,
    },

    /// Required name with no matching property
    #[error("Tool {tool} requires undeclared property {property}")]
    UndeclaredRequired {
        /// Owning tool
        tool: String,
        /// Required name
        property: String,
    },

    /// Tool already present in the set
    #[error("Tool already registered: {name}")]
    AlreadyRegistered {
        /// Duplicated name
        name: String,
    },

    /// Descriptor JSON could not be decoded
    #[error("Malformed tool descriptor: {message}")]
    Malformed {
        /// Decoder message
        message: String,
    },
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed {
            message: err.to_string(),
        }
    }
}

impl From<ToolError> for ComposeError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::InvalidName { name, reason } => {
                ComposeError::InvalidToolName { name, reason }
            }
            ToolError::AlreadyRegistered { name } => ComposeError::DuplicateTool { name },
            ToolError::Malformed { message } => ComposeError::Schema { message },
            other @ (ToolError::InvalidProperty { .. } | ToolError::UndeclaredRequired { .. }) => {
                ComposeError::InvalidArgument {
                    reason: other.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_compose_error() {
        let err: ComposeError = ToolError::AlreadyRegistered {
            name: "search".to_string(),
        }
        .into();
        assert_eq!(
            err,
            ComposeError::DuplicateTool {
                name: "search".to_string()
            }
        );

        let err: ComposeError = ToolError::UndeclaredRequired {
            tool: "search".to_string(),
            property: "query".to_string(),
        }
        .into();
        assert!(matches!(err, ComposeError::InvalidArgument { ref reason } if reason.contains("query")));
    }

    #[test]
    fn test_invalid_name_keeps_reason() {
        let err: ComposeError = ToolError::InvalidName {
            name: "a b".to_string(),
            reason: "contains ' '".to_string(),
        }
        .into();
        assert!(matches!(err, ComposeError::InvalidToolName { ref name, .. } if name == "a b"));
    }
}
