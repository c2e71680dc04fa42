use serde::Serialize;
use thiserror::Error;

/// The main error type for Orion node management operations.
///
/// Every variant is terminal for the invocation: nothing is retried and
/// nothing is rolled back.
#[derive(Error, Debug)]
pub enum OrionError {
    /// Represents errors that occur while talking to the SWIS endpoint
    ///
    /// # Fields
    /// * `0` - A description of what went wrong during the connection attempt
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents rejected credentials (HTTP 401/403 from SWIS)
    ///
    /// # Fields
    /// * `0` - A description of the authentication failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Represents validation failures of caller supplied input
    ///
    /// # Fields
    /// * `source` - The underlying validation error
    #[error("Validation error: {source}")]
    Validation { source: ValidationError },

    /// The lookup query matched no node
    #[error("Node not found: {0}")]
    NotFound(String),

    /// The lookup query matched more than one node under the strict lookup policy
    ///
    /// # Fields
    /// * `identifier` - The identifier that was looked up
    /// * `node_ids` - NodeIDs of every matching row
    #[error("Identifier {identifier} matches {} nodes (NodeIDs: {})", .node_ids.len(), join_ids(.node_ids))]
    AmbiguousNode {
        identifier: String,
        node_ids: Vec<u64>,
    },

    /// A SWIS verb invocation failed
    ///
    /// # Fields
    /// * `message` - The fault message reported by SWIS (or the transport)
    /// * `detail` - Diagnostic detail such as the remote exception text
    #[error("Remote operation failed: {message}")]
    RemoteOperation {
        message: String,
        detail: Option<String>,
    },
}

impl From<ValidationError> for OrionError {
    fn from(error: ValidationError) -> Self {
        OrionError::Validation { source: error }
    }
}

impl OrionError {
    /// Maps this error onto the caller facing error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrionError::Connection(_) | OrionError::Authentication(_) => {
                ErrorKind::ConnectionError
            }
            OrionError::Validation { .. } | OrionError::AmbiguousNode { .. } => {
                ErrorKind::InvalidInput
            }
            OrionError::NotFound(_) => ErrorKind::NotFound,
            OrionError::RemoteOperation { .. } => ErrorKind::RemoteOperationError,
        }
    }

    /// Diagnostic detail to surface alongside the message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            OrionError::RemoteOperation { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Caller facing error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    ConnectionError,
    InvalidInput,
    NotFound,
    RemoteOperationError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ConnectionError => "ConnectionError",
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::RemoteOperationError => "RemoteOperationError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    pub(crate) fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::Field {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Type alias for Results that may fail with an OrionError
pub type OrionResult<T> = Result<T, OrionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            OrionError::Connection("down".into()).kind(),
            ErrorKind::ConnectionError
        );
        assert_eq!(
            OrionError::Authentication("403".into()).kind(),
            ErrorKind::ConnectionError
        );
        assert_eq!(
            OrionError::from(ValidationError::Format("bad".into())).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            OrionError::NotFound("node_id 1".into()).kind(),
            ErrorKind::NotFound
        );
        let remote = OrionError::RemoteOperation {
            message: "denied".into(),
            detail: Some("System.UnauthorizedAccessException".into()),
        };
        assert_eq!(remote.kind(), ErrorKind::RemoteOperationError);
        assert_eq!(remote.detail(), Some("System.UnauthorizedAccessException"));
    }

    #[test]
    fn test_ambiguous_message_lists_ids() {
        let err = OrionError::AmbiguousNode {
            identifier: "ip_address 10.0.0.1".into(),
            node_ids: vec![4, 9],
        };
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            err.to_string(),
            "Identifier ip_address 10.0.0.1 matches 2 nodes (NodeIDs: 4, 9)"
        );
    }
}
