//! Contact resolution against a mock KERIA agent: idempotent short-circuit
//! for known aliases, OOBI resolution with operation polling for new ones.

use serde_json::json;
use vlei_keria_client::{
    KeriaClient, config::KeriaClientConfigBuilder, controller_id,
    errors::KeriaClientError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

const PASSCODE: &str = "0123456789abcdefghijk";
const GEDA_OOBI: &str = "http://keria:3902/oobi/EGedaExample/agent";

fn geda_contact() -> serde_json::Value {
    json!({"id": "EGedaExample", "alias": "gedaName", "oobi": GEDA_OOBI})
}

async fn mock_client(server: &MockServer) -> KeriaClient {
    let controller = controller_id(PASSCODE);

    Mock::given(method("GET"))
        .and(path(format!("/agents/{controller}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"controller": controller, "agent": "EAgentExample"})),
        )
        .mount(server)
        .await;

    let config = KeriaClientConfigBuilder::default()
        .with_admin_url(&server.uri())
        .with_boot_url(&server.uri())
        .with_passcode(PASSCODE)
        .with_operation_timeout(2_000)
        .with_operation_poll_interval(50)
        .build()
        .unwrap();

    KeriaClient::get_or_create(config).await.unwrap()
}

#[tokio::test]
async fn known_contact_short_circuits_resolution() {
    let server = MockServer::start().await;
    let client = mock_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([geda_contact()])))
        .mount(&server)
        .await;

    // A known alias must not trigger another resolution
    Mock::given(method("POST"))
        .and(path("/oobis"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let contact = client
        .get_or_create_contact("gedaName", GEDA_OOBI)
        .await
        .unwrap();

    assert_eq!(contact.id, "EGedaExample");
    assert_eq!(contact.alias, "gedaName");
}

#[tokio::test]
async fn resolves_new_contact_and_polls_operation() {
    let server = MockServer::start().await;
    let client = mock_client(&server).await;

    // First listing: nothing known yet
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oobis"))
        .and(body_json(json!({"oobialias": "gedaName", "url": GEDA_OOBI})))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"name": "oobi.EGeda", "done": false})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Pending once, then done
    Mock::given(method("GET"))
        .and(path("/operations/oobi.EGeda"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "oobi.EGeda", "done": false})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/operations/oobi.EGeda"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"name": "oobi.EGeda", "done": true, "response": geda_contact()}),
        ))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/operations/oobi.EGeda"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    // Second listing: the agent now knows the contact
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([geda_contact()])))
        .mount(&server)
        .await;

    let contact = client
        .get_or_create_contact("gedaName", GEDA_OOBI)
        .await
        .unwrap();

    assert_eq!(contact.id, "EGedaExample");

    // The freshly resolved contact is now cached
    let cached = client.get_contact("gedaName").await.unwrap();
    assert_eq!(cached.unwrap().id, "EGedaExample");
}

#[tokio::test]
async fn operation_that_never_completes_times_out() {
    let server = MockServer::start().await;

    let controller = controller_id(PASSCODE);
    Mock::given(method("GET"))
        .and(path(format!("/agents/{controller}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"controller": controller, "agent": "EAgentExample"})),
        )
        .mount(&server)
        .await;

    let config = KeriaClientConfigBuilder::default()
        .with_admin_url(&server.uri())
        .with_boot_url(&server.uri())
        .with_passcode(PASSCODE)
        .with_operation_timeout(300)
        .with_operation_poll_interval(50)
        .build()
        .unwrap();
    let client = KeriaClient::get_or_create(config).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oobis"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"name": "oobi.EGeda", "done": false})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/operations/oobi.EGeda"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"name": "oobi.EGeda", "done": false})),
        )
        .mount(&server)
        .await;

    let result = client.get_or_create_contact("gedaName", GEDA_OOBI).await;

    assert!(matches!(
        result,
        Err(KeriaClientError::OperationTimeout(name)) if name == "oobi.EGeda"
    ));
}

#[tokio::test]
async fn missing_contact_after_resolution_is_an_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server).await;

    // The agent never learns the contact, even after a "successful" resolution
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oobis"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"name": "oobi.EGeda", "done": true})),
        )
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/operations/oobi.EGeda"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = client.get_or_create_contact("gedaName", GEDA_OOBI).await;

    assert!(matches!(
        result,
        Err(KeriaClientError::ContactNotFound(alias)) if alias == "gedaName"
    ));
}

#[tokio::test]
async fn failed_operation_surfaces_the_error_payload() {
    let server = MockServer::start().await;
    let client = mock_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oobis"))
        .respond_with(ResponseTemplate::new(202).set_body_json(
            json!({"name": "oobi.EGeda", "done": true, "error": {"msg": "unreachable"}}),
        ))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/operations/oobi.EGeda"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = client.get_or_create_contact("gedaName", GEDA_OOBI).await;

    assert!(matches!(
        result,
        Err(KeriaClientError::OperationFailed(name, _)) if name == "oobi.EGeda"
    ));
}
