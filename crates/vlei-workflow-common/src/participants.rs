/*!
 * Participant (AID info) parsing.
 *
 * Workflow scripts receive the QAR participant bootstrap data as a single
 * comma-separated argument of pipe-separated triples:
 *
 * `"qar1|<salt>|qar1,qar2|<salt>|qar2,qar3|<salt>|qar3"`
 *
 * Each triple carries the participant's name, the keystore passcode salt
 * its client is keyed by, and its position (role) in the workflow.
 */

use crate::errors::{Result, WorkflowError};
use serde::{Deserialize, Serialize};
use vlei_keria_client::config::MIN_PASSCODE_LENGTH;

pub const QAR1_POSITION: &str = "qar1";
pub const QAR2_POSITION: &str = "qar2";
pub const QAR3_POSITION: &str = "qar3";

/// Per-participant identity bootstrap data
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AidInfo {
    /// Friendly name for the participant's AID
    pub name: String,

    /// Keystore passcode salt the participant's client is keyed by
    pub salt: String,

    /// Role of the participant in the workflow
    pub position: String,
}

/// The three QAR participants the multisig workflow steps operate on
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QarParticipants {
    pub qar1: AidInfo,
    pub qar2: AidInfo,
    pub qar3: AidInfo,
}

impl QarParticipants {
    /// The participant salts, in position order
    pub fn salts(&self) -> [&str; 3] {
        [&self.qar1.salt, &self.qar2.salt, &self.qar3.salt]
    }
}

/// Parse the AID info argument into the three required QAR participants.
///
/// Entries with other positions are ignored, the same argument is shared
/// with scripts that drive other workflow participants. A missing QAR
/// position is an error here rather than a deferred failure at first use.
pub fn parse_aid_info(aid_info: &str) -> Result<QarParticipants> {
    let entries = parse_entries(aid_info)?;

    Ok(QarParticipants {
        qar1: find_position(&entries, QAR1_POSITION)?,
        qar2: find_position(&entries, QAR2_POSITION)?,
        qar3: find_position(&entries, QAR3_POSITION)?,
    })
}

fn parse_entries(aid_info: &str) -> Result<Vec<AidInfo>> {
    if aid_info.trim().is_empty() {
        return Err(WorkflowError::Parse("AID info argument is empty".into()));
    }

    aid_info
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            let parts: Vec<&str> = entry.split('|').collect();
            let [name, salt, position] = parts.as_slice() else {
                return Err(WorkflowError::Parse(format!(
                    "AID info entry ({entry}) must be name|salt|position"
                )));
            };

            if name.is_empty() || salt.is_empty() || position.is_empty() {
                return Err(WorkflowError::Parse(format!(
                    "AID info entry ({entry}) has an empty field"
                )));
            }
            if salt.len() < MIN_PASSCODE_LENGTH {
                return Err(WorkflowError::Parse(format!(
                    "AID info entry ({name}) salt must be at least {MIN_PASSCODE_LENGTH} characters"
                )));
            }

            Ok(AidInfo {
                name: name.to_string(),
                salt: salt.to_string(),
                position: position.to_string(),
            })
        })
        .collect()
}

// First occurrence wins if a position is repeated
fn find_position(entries: &[AidInfo], position: &str) -> Result<AidInfo> {
    entries
        .iter()
        .find(|entry| entry.position == position)
        .cloned()
        .ok_or_else(|| WorkflowError::MissingRole(position.to_string()))
}
