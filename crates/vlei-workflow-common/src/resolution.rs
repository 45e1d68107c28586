/*!
 * Multisig OOBI resolution fan-out.
 *
 * Every QAR client must learn about both delegated multisig AIDs (GEDA and
 * LE) before the delegation and credential-issuance steps can proceed. The
 * fan-out issues one contact resolution per (client, OOBI) pair, all
 * concurrently, and waits for every call to settle.
 *
 * Each call carries its own timeout, and the report records the outcome of
 * every pair rather than aborting on the first failure, so a failed run
 * states exactly which resolutions broke.
 */

use crate::{
    errors::{Result, WorkflowError},
    oobis::MultisigOobis,
};
use futures_util::future::join_all;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use vlei_keria_client::{KeriaClient, contacts::Contact};

/// Default per-call timeout for a single contact resolution
pub const DEFAULT_RESOLUTION_TIMEOUT: Duration = Duration::from_secs(30);

/// The outcome of one (client, OOBI) resolution call
#[derive(Debug)]
pub struct ResolutionOutcome {
    /// Name of the client the call was issued on
    pub client: String,

    /// Position of the OOBI that was resolved
    pub position: String,

    /// The OOBI URL that was resolved
    pub oobi: String,

    pub result: std::result::Result<Contact, WorkflowError>,
}

/// Per-call outcomes of a resolution fan-out, in (client, position) order
#[derive(Debug)]
pub struct ResolutionReport {
    pub outcomes: Vec<ResolutionOutcome>,
}

impl ResolutionReport {
    /// True if every call succeeded
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    /// The outcomes that succeeded
    pub fn successes(&self) -> Vec<&ResolutionOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_ok())
            .collect()
    }

    /// The outcomes that failed
    pub fn failures(&self) -> Vec<&ResolutionOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_err())
            .collect()
    }

    /// Collapse the report into a single result: `Ok(self)` if every call
    /// succeeded, otherwise an error naming every failed (client, position)
    /// pair.
    pub fn into_result(self) -> Result<ResolutionReport> {
        let failed: Vec<String> = self
            .failures()
            .iter()
            .map(|outcome| {
                let err = outcome.result.as_ref().unwrap_err();
                format!("{}/{}: {err}", outcome.client, outcome.position)
            })
            .collect();

        if failed.is_empty() {
            Ok(self)
        } else {
            Err(WorkflowError::Resolution(failed.join("; ")))
        }
    }
}

/// Resolve both multisig OOBIs on every client: one contact resolution per
/// (client, OOBI) pair, all issued concurrently. Waits for every call to
/// settle and reports each outcome.
pub async fn resolve_multisig_oobis(
    clients: &[KeriaClient],
    oobis: &MultisigOobis,
    per_call_timeout: Duration,
) -> ResolutionReport {
    let mut calls = Vec::with_capacity(clients.len() * 2);

    for client in clients {
        for info in [&oobis.geda, &oobis.le] {
            let client = client.clone();
            let position = info.position.clone();
            let oobi = info.oobi.clone();

            calls.push(async move {
                debug!("resolving ({position}) on client ({})", client.name());

                let result = match timeout(
                    per_call_timeout,
                    client.get_or_create_contact(&position, &oobi),
                )
                .await
                {
                    Ok(Ok(contact)) => Ok(contact),
                    Ok(Err(err)) => Err(WorkflowError::from(err)),
                    Err(_) => Err(WorkflowError::Timeout(format!(
                        "resolving ({position}) on client ({}) exceeded {per_call_timeout:?}",
                        client.name()
                    ))),
                };

                ResolutionOutcome {
                    client: client.name(),
                    position,
                    oobi,
                    result,
                }
            });
        }
    }

    ResolutionReport {
        outcomes: join_all(calls).await,
    }
}
