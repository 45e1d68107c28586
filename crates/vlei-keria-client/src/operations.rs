/*!
 * Long-running agent operations.
 *
 * OOBI resolution (and most other agent side effects) return an operation
 * that completes asynchronously. [KeriaClient::wait_operation] polls the
 * agent until the operation is done or the configured timeout elapses.
 */

use crate::{
    KeriaClient,
    errors::{KeriaClientError, Result},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

/// A long-running operation tracked by the agent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Operation {
    /// Operation name, used to poll and delete it
    pub name: String,

    #[serde(default)]
    pub done: bool,

    /// Result payload once the operation is done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,

    /// Error payload if the operation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl Operation {
    /// True if the operation completed but carries an error payload
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

impl KeriaClient {
    /// Fetch the current state of an operation
    pub async fn get_operation(&self, name: &str) -> Result<Operation> {
        self.get_json(&format!("/operations/{name}")).await
    }

    /// Poll an operation until it is done or the configured operation
    /// timeout elapses. A completed operation is deleted from the agent
    /// afterwards (best effort).
    pub async fn wait_operation(&self, operation: &Operation) -> Result<Operation> {
        let deadline = Instant::now() + self.config.operation_timeout;
        let mut current = operation.clone();

        loop {
            if current.done {
                break;
            }
            if Instant::now() >= deadline {
                return Err(KeriaClientError::OperationTimeout(current.name));
            }
            sleep(self.config.operation_poll_interval).await;
            current = self.get_operation(&current.name).await?;
        }

        debug!("operation ({}) done", current.name);

        if let Err(err) = self.delete_operation(&current.name).await {
            warn!("couldn't clean up operation ({}): {err}", current.name);
        }

        if current.failed() {
            let detail = current
                .error
                .as_ref()
                .map(|err| err.to_string())
                .unwrap_or_default();
            return Err(KeriaClientError::OperationFailed(current.name, detail));
        }

        Ok(current)
    }

    /// Remove a finished operation from the agent
    pub async fn delete_operation(&self, name: &str) -> Result<()> {
        self.delete(&format!("/operations/{name}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_pending_operation() {
        let operation: Operation =
            serde_json::from_value(json!({"name": "oobi.EABC", "done": false})).unwrap();

        assert_eq!(operation.name, "oobi.EABC");
        assert!(!operation.done);
        assert!(operation.response.is_none());
        assert!(!operation.failed());
    }

    #[test]
    fn deserializes_failed_operation() {
        let operation: Operation = serde_json::from_value(json!({
            "name": "oobi.EABC",
            "done": true,
            "error": {"msg": "unreachable"}
        }))
        .unwrap();

        assert!(operation.done);
        assert!(operation.failed());
    }
}
