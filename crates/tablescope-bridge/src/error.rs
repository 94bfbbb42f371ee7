//! Error types for bridge endpoints.

use tablescope_session::{CloseError, ConnectError, QueryError};
use thiserror::Error;

/// Failures surfaced by an endpoint.
///
/// Session errors keep their own message so the caller sees the driver's
/// text unchanged.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Opening the connection failed.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// A statement failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Releasing the connection failed.
    #[error(transparent)]
    Close(#[from] CloseError),

    /// The request could not be decoded.
    #[error("malformed request: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
