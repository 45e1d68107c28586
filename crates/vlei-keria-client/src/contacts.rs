/*!
 * Agent contacts.
 *
 * A contact is an identifier this client's agent has learned about through
 * OOBI resolution. [KeriaClient::get_or_create_contact] is the idempotent
 * front door used by the workflow scripts: an already-known alias is
 * returned as-is, otherwise the OOBI is resolved first.
 */

use crate::{
    KeriaClient,
    errors::{KeriaClientError, Result},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A contact known to the agent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    /// The contact's identifier prefix
    pub id: String,

    /// Alias the contact was resolved under
    pub alias: String,

    /// The OOBI URL the contact was introduced through
    #[serde(default)]
    pub oobi: String,
}

impl KeriaClient {
    /// List all contacts known to the agent.
    /// Refreshes the local contact cache as a side effect.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let contacts: Vec<Contact> = self.get_json("/contacts").await?;

        for contact in &contacts {
            self.contacts
                .insert(contact.alias.clone(), contact.clone())
                .await;
        }

        Ok(contacts)
    }

    /// Look up a contact by alias.
    /// Checks the local cache first, then the agent.
    pub async fn get_contact(&self, alias: &str) -> Result<Option<Contact>> {
        if let Some(contact) = self.contacts.get(alias).await {
            debug!("found contact ({alias}) in cache");
            return Ok(Some(contact));
        }

        self.fetch_contact(alias).await
    }

    /// Return the contact for `alias` if the agent already knows it,
    /// otherwise resolve the OOBI, wait for the resolution operation to
    /// complete, and return the newly learned contact.
    pub async fn get_or_create_contact(&self, alias: &str, oobi: &str) -> Result<Contact> {
        if let Some(contact) = self.get_contact(alias).await? {
            debug!("contact ({alias}) already known, skipping resolution");
            return Ok(contact);
        }

        let operation = self.resolve_oobi(alias, oobi).await?;
        self.wait_operation(&operation).await?;

        match self.fetch_contact(alias).await? {
            Some(contact) => Ok(contact),
            None => Err(KeriaClientError::ContactNotFound(alias.to_string())),
        }
    }

    // Always asks the agent, bypassing the cache
    async fn fetch_contact(&self, alias: &str) -> Result<Option<Contact>> {
        let contacts = self.list_contacts().await?;
        Ok(contacts.into_iter().find(|contact| contact.alias == alias))
    }
}
