// Client error types

use thiserror::Error;

/// Main error type for the query client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or connection failure, including failures reading the body
    #[error("Transport error: {0}")]
    Transport(String),

    /// Transport deadline elapsed before the response was read
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body did not match the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Service answered with a non-200 status and a structured error payload
    #[error("HTTP error: {status} - {message}")]
    Service {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Header override with an invalid name or value
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Request payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// True for failures below the HTTP layer (connect, read, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Timeout(_))
    }

    /// True when the service itself reported the failure
    pub fn is_service(&self) -> bool {
        matches!(self, ClientError::Service { .. })
    }

    /// Message reported by the service, if this is a service error
    pub fn service_message(&self) -> Option<&str> {
        match self {
            ClientError::Service { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// HTTP status that produced this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
