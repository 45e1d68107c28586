/*!
 * Concurrent client bootstrap.
 *
 * Workflow steps operate on several participant clients at once; this
 * module boots/connects them all concurrently against the environment's
 * KERIA endpoints. Bootstrap is fail-fast: later workflow steps can't
 * proceed with a partial set of clients.
 */

use crate::{
    environments::WorkflowEnvironment,
    errors::{Result, WorkflowError},
};
use futures_util::future::try_join_all;
use tracing::debug;
use vlei_keria_client::{KeriaClient, config::KeriaClientConfigBuilder};

/// Boot or connect `count` clients, one per salt, against the environment's
/// KERIA endpoints. Requires at least `count` salts.
pub async fn get_or_create_clients(
    count: usize,
    salts: &[&str],
    environment: &WorkflowEnvironment,
) -> Result<Vec<KeriaClient>> {
    if salts.len() < count {
        return Err(WorkflowError::Keystore(format!(
            "need {count} salts, got {}",
            salts.len()
        )));
    }

    let mut bootstraps = Vec::with_capacity(count);
    for salt in salts.iter().take(count) {
        let config = KeriaClientConfigBuilder::default()
            .with_admin_url(&environment.keria_admin_url)
            .with_boot_url(&environment.keria_boot_url)
            .with_passcode(salt)
            .build()
            .map_err(|err| WorkflowError::Keystore(err.to_string()))?;

        bootstraps.push(KeriaClient::get_or_create(config));
    }

    let clients = try_join_all(bootstraps)
        .await
        .map_err(|err| WorkflowError::Keystore(format!("client bootstrap failed: {err}")))?;

    debug!("bootstrapped {} clients", clients.len());
    Ok(clients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::EnvironmentPreset;

    #[tokio::test]
    async fn too_few_salts_fails() {
        let environment = WorkflowEnvironment::from_preset(EnvironmentPreset::Local);
        let result = get_or_create_clients(3, &["0ACDEyMzQ1Njc4OWxtbm9A"], &environment).await;

        assert!(matches!(result, Err(WorkflowError::Keystore(_))));
    }

    #[tokio::test]
    async fn invalid_salt_fails_before_any_network_call() {
        let environment = WorkflowEnvironment::from_preset(EnvironmentPreset::Local);
        let result = get_or_create_clients(1, &["short"], &environment).await;

        assert!(matches!(result, Err(WorkflowError::Keystore(_))));
    }
}
