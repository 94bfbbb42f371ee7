//! Error types for session operations.

use thiserror::Error;

/// Failures while establishing a connection.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The session already holds a connection.
    #[error("session is already connected")]
    AlreadyConnected,

    /// The driver could not connect (network, authentication, ...).
    #[error("connection failed: {0}")]
    Driver(#[from] sqlx::Error),
}

/// Failures while running a statement.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No connection has been established.
    #[error("not connected")]
    NotConnected,

    /// The statement needs a selected database.
    #[error("no database selected")]
    NoDatabaseSelected,

    /// The server answered with rows of an unexpected shape.
    #[error("unexpected result shape: {0}")]
    UnexpectedShape(String),

    /// The driver reported an execution failure.
    #[error("query failed: {0}")]
    Driver(#[from] sqlx::Error),
}

/// Failures while releasing a connection.
#[derive(Debug, Error)]
pub enum CloseError {
    /// The driver reported an error while ending the connection.
    #[error("close failed: {0}")]
    Driver(#[from] sqlx::Error),
}
