/*!
KERIA Cloud Agent Client SDK

Used by the vLEI workflow test harness to drive a KERIA cloud agent:
booting/connecting clients keyed by a passcode salt, resolving OOBIs and
managing contacts.

The KERI protocol internals (key events, witnesses, multisig thresholds,
CESR encoding) are handled by the agent itself and are out of scope here.
This SDK only models the HTTP surface the harness exercises.
*/

use crate::{
    config::KeriaClientConfig,
    errors::{KeriaClientError, Result},
};
use contacts::Contact;
use moka::future::Cache;
use reqwest::Client;
use rustls::ClientConfig;
use rustls_platform_verifier::ConfigVerifierExt;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

pub mod config;
pub mod contacts;
pub mod errors;
pub mod oobis;
pub mod operations;

/// Identifiers reported by the agent for a booted client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentInfo {
    /// The controller identifier the keystore is keyed by
    pub controller: String,
    /// The agent identifier serving this controller
    pub agent: String,
}

/// Creates a reusable HTTP/HTTPS Client that can be used
pub fn create_http_client() -> Client {
    // Set a process wide default crypto provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let tls_config = ClientConfig::with_platform_verifier();
    reqwest::ClientBuilder::new()
        .use_rustls_tls()
        .use_preconfigured_tls(tls_config.unwrap())
        .user_agent(format!(
            "vLEI Workflow Harness {}",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .unwrap()
}

/// [KeriaClient] is how you interact with a KERIA cloud agent
/// config: Configuration for the SDK
/// contacts: Local cache of resolved contacts keyed by alias
/// agent: Identifiers returned by the agent on bootstrap
#[derive(Clone)]
pub struct KeriaClient {
    pub(crate) config: KeriaClientConfig,
    pub(crate) http_client: Client,
    pub(crate) contacts: Cache<String, Contact>,
    controller: String,
    agent: AgentInfo,
}

impl KeriaClient {
    /// Idempotent client bootstrap against the agent, mirroring the
    /// get-or-create keystore behavior of the workflow scripts.
    ///
    /// Connects to the agent for this passcode if one exists, otherwise
    /// boots a new one and connects to it.
    pub async fn get_or_create(config: KeriaClientConfig) -> Result<KeriaClient> {
        let http_client = create_http_client();
        let controller = controller_id(&config.passcode);

        let agent = match Self::fetch_agent(&http_client, &config, &controller).await? {
            Some(agent) => {
                debug!("agent for controller ({controller}) already exists");
                agent
            }
            None => {
                debug!("agent for controller ({controller}) not found, booting");
                Self::boot_agent(&http_client, &config).await?;
                Self::fetch_agent(&http_client, &config, &controller)
                    .await?
                    .ok_or_else(|| {
                        KeriaClientError::AgentError(format!(
                            "agent for controller ({controller}) missing after boot"
                        ))
                    })?
            }
        };

        let contacts = Cache::builder()
            .max_capacity(config.contact_cache_capacity.into())
            .time_to_live(std::time::Duration::from_secs(
                config.contact_cache_ttl.into(),
            ))
            .build();

        Ok(KeriaClient {
            config,
            http_client,
            contacts,
            controller,
            agent,
        })
    }

    /// The controller identifier this client's keystore is keyed by
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Identifiers reported by the agent on bootstrap
    pub fn agent_info(&self) -> &AgentInfo {
        &self.agent
    }

    /// Friendly name for this client: the configured alias if set,
    /// otherwise a shortened controller identifier
    pub fn name(&self) -> String {
        match &self.config.alias {
            Some(alias) => alias.clone(),
            None => self.controller.chars().take(8).collect(),
        }
    }

    async fn fetch_agent(
        http_client: &Client,
        config: &KeriaClientConfig,
        controller: &str,
    ) -> Result<Option<AgentInfo>> {
        let url = format!("{}/agents/{controller}", config.admin_url);
        debug!("GET {url}");

        let response = http_client
            .get(&url)
            .timeout(config.request_timeout)
            .send()
            .await
            .map_err(|err| {
                KeriaClientError::TransportError(format!("HTTP GET failed ({url}): {err:?}"))
            })?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }

        let body = response.text().await.map_err(|err| {
            KeriaClientError::TransportError(format!("Couldn't get HTTP body: {err:?}"))
        })?;
        debug!("status: {status} response body: {body}");

        if !status.is_success() {
            return Err(KeriaClientError::AgentError(format!(
                "agent lookup failed. url: {url}, status: {status}"
            )));
        }

        let agent = serde_json::from_str::<AgentInfo>(&body).map_err(|err| {
            KeriaClientError::AgentError(format!("Couldn't deserialize agent info: {err}"))
        })?;
        Ok(Some(agent))
    }

    async fn boot_agent(http_client: &Client, config: &KeriaClientConfig) -> Result<()> {
        let url = format!("{}/boot", config.boot_url);

        let mut body = json!({"passcode": config.passcode});
        if let Some(alias) = &config.alias {
            body["name"] = json!(alias);
        }

        debug!("POSTing to {url}");
        let response = http_client
            .post(&url)
            .timeout(config.request_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                KeriaClientError::TransportError(format!("HTTP POST failed ({url}): {err:?}"))
            })?;

        let status = response.status();
        // 409 means a previous run already booted this keystore
        if status.is_success() || status.as_u16() == 409 {
            Ok(())
        } else {
            Err(KeriaClientError::AgentError(format!(
                "agent boot failed. url: {url}, status: {status}"
            )))
        }
    }

    pub(crate) async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{path}", self.config.admin_url);
        debug!("GET {url}");

        let response = self
            .http_client
            .get(&url)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|err| {
                KeriaClientError::TransportError(format!("HTTP GET failed ({url}): {err:?}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            KeriaClientError::TransportError(format!("Couldn't get HTTP body: {err:?}"))
        })?;
        debug!("status: {status} response body: {body}");

        if !status.is_success() {
            return Err(KeriaClientError::AgentError(format!(
                "request failed. url: {url}, status: {status}"
            )));
        }

        serde_json::from_str::<T>(&body).map_err(|err| {
            KeriaClientError::AgentError(format!("Couldn't deserialize response ({url}): {err}"))
        })
    }

    pub(crate) async fn post_json<T>(&self, path: &str, body: &Value) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{path}", self.config.admin_url);
        debug!("POSTing to {url}");
        debug!("Body: {body}");

        let response = self
            .http_client
            .post(&url)
            .timeout(self.config.request_timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                KeriaClientError::TransportError(format!("HTTP POST failed ({url}): {err:?}"))
            })?;

        let status = response.status();
        let response_body = response.text().await.map_err(|err| {
            KeriaClientError::TransportError(format!("Couldn't get HTTP body: {err:?}"))
        })?;
        debug!("status: {status} response body: {response_body}");

        if !status.is_success() {
            return Err(KeriaClientError::AgentError(format!(
                "request failed. url: {url}, status: {status}"
            )));
        }

        serde_json::from_str::<T>(&response_body).map_err(|err| {
            KeriaClientError::AgentError(format!("Couldn't deserialize response ({url}): {err}"))
        })
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{path}", self.config.admin_url);
        debug!("DELETE {url}");

        let response = self
            .http_client
            .delete(&url)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|err| {
                KeriaClientError::TransportError(format!("HTTP DELETE failed ({url}): {err:?}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(KeriaClientError::AgentError(format!(
                "request failed. url: {url}, status: {status}"
            )));
        }
        Ok(())
    }
}

/// Stable identifier for a keystore controller, derived from the passcode.
///
/// The real controller AID is derived cryptographically inside the agent;
/// the harness only needs a stable lookup key per passcode.
pub fn controller_id(passcode: &str) -> String {
    sha256::digest(passcode)
}
