/*!
 * Multisig OOBI parsing.
 *
 * Workflow scripts receive the OOBIs of the two delegated multisig AIDs as
 * a single comma-separated argument of pipe-separated pairs:
 *
 * `"gedaName|<oobi url>,leName|<oobi url>"`
 *
 * The GEDA (GLEIF External Delegated AID) and LE (Legal Entity) entries are
 * both required for the delegation and credential-issuance steps that
 * follow; a missing one is an error at parse time rather than a deferred
 * failure at first use.
 */

use crate::errors::{Result, WorkflowError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Position tag of the GEDA multisig AID entry
pub const GEDA_POSITION: &str = "gedaName";
/// Position tag of the LE multisig AID entry
pub const LE_POSITION: &str = "leName";

/// A position (role) paired with the OOBI URL of its multisig AID
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OobiInfo {
    pub position: String,
    pub oobi: String,
}

/// The two multisig OOBIs the QAR clients must resolve
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigOobis {
    pub geda: OobiInfo,
    pub le: OobiInfo,
}

/// Parse the OOBI info argument into the two required multisig entries.
/// Entries with unknown positions are ignored without error.
pub fn parse_oobi_info(oobi_info: &str) -> Result<MultisigOobis> {
    if oobi_info.trim().is_empty() {
        return Err(WorkflowError::Parse("OOBI info argument is empty".into()));
    }

    let entries = oobi_info
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            let parts: Vec<&str> = entry.split('|').collect();
            let [position, oobi] = parts.as_slice() else {
                return Err(WorkflowError::Parse(format!(
                    "OOBI info entry ({entry}) must be position|url"
                )));
            };

            if position.is_empty() {
                return Err(WorkflowError::Parse(format!(
                    "OOBI info entry ({entry}) has an empty position"
                )));
            }
            validate_oobi_url(position, oobi)?;

            Ok(OobiInfo {
                position: position.to_string(),
                oobi: oobi.to_string(),
            })
        })
        .collect::<Result<Vec<OobiInfo>>>()?;

    Ok(MultisigOobis {
        geda: find_position(&entries, GEDA_POSITION)?,
        le: find_position(&entries, LE_POSITION)?,
    })
}

fn validate_oobi_url(position: &str, oobi: &str) -> Result<()> {
    let url = Url::parse(oobi).map_err(|err| {
        WorkflowError::Parse(format!("OOBI ({position}) URL ({oobi}) is invalid: {err}"))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(WorkflowError::Parse(format!(
            "OOBI ({position}) URL ({oobi}) must be http or https, got {scheme}"
        ))),
    }
}

// First occurrence wins if a position is repeated
fn find_position(entries: &[OobiInfo], position: &str) -> Result<OobiInfo> {
    entries
        .iter()
        .find(|entry| entry.position == position)
        .cloned()
        .ok_or_else(|| WorkflowError::MissingRole(position.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_positions() {
        let oobis = parse_oobi_info("gedaName|http://x,leName|http://y").unwrap();

        assert_eq!(oobis.geda.position, "gedaName");
        assert_eq!(oobis.geda.oobi, "http://x");
        assert_eq!(oobis.le.position, "leName");
        assert_eq!(oobis.le.oobi, "http://y");
    }

    #[test]
    fn entry_order_does_not_matter() {
        let oobis = parse_oobi_info("leName|http://y,gedaName|http://x").unwrap();

        assert_eq!(oobis.geda.oobi, "http://x");
        assert_eq!(oobis.le.oobi, "http://y");
    }

    #[test]
    fn unknown_positions_are_ignored() {
        let oobis =
            parse_oobi_info("gedaName|http://x,leName|http://y,garName|http://z").unwrap();

        assert_eq!(oobis.geda.oobi, "http://x");
        assert_eq!(oobis.le.oobi, "http://y");
    }

    #[test]
    fn missing_le_is_a_descriptive_error() {
        let result = parse_oobi_info("gedaName|http://x");

        assert!(matches!(
            result,
            Err(WorkflowError::MissingRole(role)) if role == "leName"
        ));
    }

    #[test]
    fn missing_geda_is_a_descriptive_error() {
        let result = parse_oobi_info("leName|http://y");

        assert!(matches!(
            result,
            Err(WorkflowError::MissingRole(role)) if role == "gedaName"
        ));
    }

    #[test]
    fn duplicate_position_first_wins() {
        let oobis =
            parse_oobi_info("gedaName|http://x,gedaName|http://z,leName|http://y").unwrap();

        assert_eq!(oobis.geda.oobi, "http://x");
    }

    #[test]
    fn malformed_entry_fails() {
        let result = parse_oobi_info("gedaName,leName|http://y");
        assert!(matches!(result, Err(WorkflowError::Parse(_))));
    }

    #[test]
    fn non_http_url_fails() {
        let result = parse_oobi_info("gedaName|ftp://x,leName|http://y");
        assert!(matches!(result, Err(WorkflowError::Parse(_))));
    }

    #[test]
    fn empty_argument_fails() {
        assert!(matches!(
            parse_oobi_info(""),
            Err(WorkflowError::Parse(_))
        ));
    }
}
