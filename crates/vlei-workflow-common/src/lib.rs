/*!
 * Common modules used across the vLEI workflow test harness
 *
 * The harness drives QVI credential-issuance test scenarios: parsing the
 * delimited argument strings the workflow scripts pass around, bootstrapping
 * KERIA clients per participant, and fanning out multisig OOBI resolutions.
 */

pub mod environments;
pub mod errors;
pub mod keystore;
pub mod oobis;
pub mod participants;
pub mod resolution;

pub use vlei_keria_client as keria_client;
