//! Resolves the GLEIF External Delegated AID (GEDA) and Legal Entity (LE)
//! multisig OOBIs for the QAR participant clients, ahead of the delegation
//! and LE credential issuance workflow steps.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::filter;
use vlei_workflow_common::{
    environments::{EnvironmentPreset, WorkflowEnvironment},
    errors::WorkflowError,
    keystore::get_or_create_clients,
    oobis::parse_oobi_info,
    participants::parse_aid_info,
    resolution::{DEFAULT_RESOLUTION_TIMEOUT, resolve_multisig_oobis},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Runtime environment preset (local or docker)
    environment: String,

    /// Comma-separated participant info: "name|salt|position,..."
    aid_info: String,

    /// Comma-separated multisig OOBIs: "gedaName|url,leName|url"
    oobi_info: String,
}

#[tokio::main]
async fn main() -> Result<(), WorkflowError> {
    let args: Args = Args::parse();

    // construct a subscriber that prints formatted traces to stdout
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter::EnvFilter::from_default_env())
        .finish();
    // use that subscriber to process traces emitted after this point
    tracing::subscriber::set_global_default(subscriber).expect("Logging failed, exiting...");

    let preset = EnvironmentPreset::try_from(args.environment.as_str())?;
    let environment = WorkflowEnvironment::from_preset(preset).with_env_overrides();
    info!(
        "using environment ({preset}), keria admin ({})",
        environment.keria_admin_url
    );

    let participants = parse_aid_info(&args.aid_info)?;
    let clients = get_or_create_clients(3, &participants.salts(), &environment).await?;
    for client in &clients {
        info!(
            "client ({}) connected to agent ({})",
            client.name(),
            client.agent_info().agent
        );
    }

    let oobis = parse_oobi_info(&args.oobi_info)?;
    let report = resolve_multisig_oobis(&clients, &oobis, DEFAULT_RESOLUTION_TIMEOUT).await;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(contact) => {
                info!(
                    "client ({}) resolved ({}) to ({})",
                    outcome.client, outcome.position, contact.id
                );
            }
            Err(err) => {
                error!(
                    "client ({}) failed to resolve ({}): {err}",
                    outcome.client, outcome.position
                );
            }
        }
    }

    report.into_result()?;
    println!("Resolved multisig OOBIs");

    Ok(())
}
