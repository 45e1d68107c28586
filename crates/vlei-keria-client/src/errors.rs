//! Error types for the KERIA client SDK
use thiserror::Error;

/// KeriaClientError is the error type for the KERIA client SDK.
///
/// This error type is used for all errors that can occur when driving a KERIA
/// cloud agent.
#[derive(Error, Debug)]
pub enum KeriaClientError {
    /// An error occurred in the client configuration.
    #[error("Config error: {0}")]
    ConfigError(String),
    /// An error occurred at the transport layer.
    #[error("Transport error: {0}")]
    TransportError(String),
    /// The agent responded with a non-success status.
    #[error("Agent error: {0}")]
    AgentError(String),
    /// A long-running operation did not complete in time.
    #[error("Operation ({0}) timed out")]
    OperationTimeout(String),
    /// A long-running operation completed with an error.
    #[error("Operation ({0}) failed: {1}")]
    OperationFailed(String, String),
    /// The contact was not known to the agent after OOBI resolution.
    #[error("Contact ({0}) not found")]
    ContactNotFound(String),
}

pub type Result<T> = std::result::Result<T, KeriaClientError>;
