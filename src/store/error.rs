use super::ObjectKind;

/// Errors that can occur while talking to the object store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection could not be established
    #[error("Could not connect to {host}: {reason}")]
    Connection {
        /// Host the connection was attempted against
        host: String,
        /// Why the connection failed
        reason: String,
    },

    /// Object id is not a decimal integer
    #[error("Invalid object id '{0}'")]
    InvalidId(String),

    /// Object type name is not recognized
    #[error("Unknown object type '{0}'. Valid options: project, dataset, image")]
    UnknownKind(String),

    /// Object does not exist
    #[error("{kind} with ID {id} not found")]
    NotFound {
        /// Object type
        kind: ObjectKind,
        /// Object id
        id: i64,
    },

    /// I/O error reading or writing store state
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Operation attempted on a closed session
    #[error("Session already closed")]
    Closed,
}
