//! Error types for the gRPC server and clients.

use thiserror::Error;

/// Errors returned by the inventory clients.
///
/// A `false` result from `AddItem` is not an error; it comes back as
/// `Ok(false)`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The host and port do not form a valid endpoint URI
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// The call failed on the wire or on the server
    #[error("RPC failed: {0}")]
    Status(Box<tonic::Status>),
    /// The client runtime could not be started
    #[error("failed to start client runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The call was dropped before it reported an outcome
    #[error("call dropped before completion")]
    Dropped,
}

impl ClientError {
    /// The gRPC status, if the failure came from a call.
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            Self::Status(status) => Some(&**status),
            _ => None,
        }
    }
}

impl From<tonic::Status> for ClientError {
    fn from(status: tonic::Status) -> Self {
        Self::Status(Box::new(status))
    }
}

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
    /// The transport failed while serving
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}
