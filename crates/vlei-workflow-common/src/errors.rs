/*!
 * Common workflow errors and handling/conversion
 */

use thiserror::Error;
use vlei_keria_client::errors::KeriaClientError;

/// vLEI workflow harness errors
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// A delimited argument string was malformed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required role was missing from a delimited argument string
    #[error("Missing required role: {0}")]
    MissingRole(String),

    #[error("Environment error: {0}")]
    Environment(String),

    /// Client bootstrap against the agent failed
    #[error("Keystore error: {0}")]
    Keystore(String),

    #[error("KERIA client error: {0}")]
    KeriaClient(String),

    /// A resolution call exceeded its per-call timeout
    #[error("Timed out: {0}")]
    Timeout(String),

    /// One or more resolution calls in a fan-out failed
    #[error("Resolution failed: {0}")]
    Resolution(String),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;

impl From<KeriaClientError> for WorkflowError {
    fn from(error: KeriaClientError) -> Self {
        WorkflowError::KeriaClient(error.to_string())
    }
}
