//! Error types for policy compilation.

use thiserror::Error;

/// Errors raised while compiling a policy into a query plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A raw scope coexists with other rule conditions in the same policy.
    #[error(
        "cannot combine a raw scope with other conditions; \
         use a condition map for the '{action}' rule on '{subject}'"
    )]
    ScopeConflict { action: String, subject: String },

    /// Entity type not found in the schema.
    #[error("entity type not found: {type_name}")]
    UnknownEntityType { type_name: String },

    /// Attribute not declared on the entity type.
    #[error("attribute '{attribute}' not found on type '{type_name}'")]
    UnknownAttribute { type_name: String, attribute: String },

    /// A nested condition sits under a key that is not an association.
    #[error("association '{association}' not found on type '{type_name}'")]
    UnresolvedAssociation {
        type_name: String,
        association: String,
    },

    /// A condition value that cannot be compiled.
    #[error("invalid condition: {message}")]
    InvalidCondition { message: String },

    /// Depth limit exceeded while descending nested conditions.
    #[error("depth limit exceeded (max: {max_depth})")]
    DepthLimitExceeded { max_depth: u32 },
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
