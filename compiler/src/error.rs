use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConstGenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Given name is not valid and does not contain any valid identifier sequence: {0}")]
    InvalidIdentifier(String),

    #[error("\"documentation\" cannot be of type {found}; use a string or an array of lines")]
    InvalidDocumentationType { found: String },

    #[error("Number of opening and closing parentheses doesn't match in {0}")]
    UnbalancedParentheses(String),

    #[error("Malformed tuple {descriptor}: {reason}")]
    MalformedTuple {
        descriptor: String,
        reason:     String,
    },

    #[error("Malformed descriptor {descriptor}: {reason}")]
    MalformedDescriptor {
        descriptor: String,
        reason:     String,
    },

    #[error("Invalid array size {size} in {descriptor}; must be greater than 0")]
    InvalidArraySize {
        descriptor: String,
        size:       String,
    },

    #[error("Invalid field \"{field}\" of {node}: {reason}")]
    SchemaValidation {
        node:   String,
        field:  String,
        reason: String,
    },

    #[error("{construct} cannot be rendered by the {dialect} dialect")]
    UnsupportedTypeConstruct {
        construct: String,
        dialect:   &'static str,
    },

    #[error("Unknown declaration kind \"{0}\"")]
    UnknownDeclarationKind(String),
}

impl ConstGenError {
    pub(crate) fn validation(node: &str, field: &str, reason: impl Into<String>) -> Self {
        ConstGenError::SchemaValidation {
            node:   node.to_string(),
            field:  field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(descriptor: &str, reason: impl Into<String>) -> Self {
        ConstGenError::MalformedDescriptor {
            descriptor: descriptor.to_string(),
            reason:     reason.into(),
        }
    }

    pub(crate) fn malformed_tuple(descriptor: &str, reason: impl Into<String>) -> Self {
        ConstGenError::MalformedTuple {
            descriptor: descriptor.to_string(),
            reason:     reason.into(),
        }
    }
}
