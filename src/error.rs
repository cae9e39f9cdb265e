use thiserror::Error;

/// Main error type for relstore
#[derive(Error, Debug)]
pub enum RelstoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Node not found by id
    #[error("Node not found: {0}")]
    NodeNotFound(i64),

    /// Relationship not found by id (or stored under a different edge type)
    #[error("Relationship not found: {0}")]
    RelationshipNotFound(i64),

    /// Identifier already assigned by the persistence layer
    #[error("Record already persisted with id {0}")]
    AlreadyPersisted(i64),

    /// Attribute serialization errors
    #[error("Attribute error: {0}")]
    Attributes(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using RelstoreError
pub type Result<T> = std::result::Result<T, RelstoreError>;
