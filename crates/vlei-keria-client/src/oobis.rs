/*!
 * OOBI (Out-Of-Band Introduction) resolution.
 *
 * Resolving an OOBI URL introduces the identifier behind it to this
 * client's agent. Resolution is asynchronous on the agent side and is
 * tracked as a long-running [Operation](crate::operations::Operation).
 */

use crate::{KeriaClient, errors::Result, operations::Operation};
use serde_json::json;
use tracing::debug;

impl KeriaClient {
    /// Ask the agent to resolve an OOBI URL under the given alias.
    /// Returns the operation tracking the resolution.
    pub async fn resolve_oobi(&self, alias: &str, url: &str) -> Result<Operation> {
        debug!("resolving oobi ({url}) as alias ({alias})");

        self.post_json("/oobis", &json!({"oobialias": alias, "url": url}))
            .await
    }
}
