#![allow(clippy::unwrap_used)]
// Integration tests for `DeviceClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rutx_api::{DeviceClient, Error, Method};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DeviceClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DeviceClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn secret(s: &str) -> secrecy::SecretString {
    s.to_string().into()
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "token": token }
            })),
        )
        .mount(server)
        .await;
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_bearer_token() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-123").await;

    Mock::given(method("GET"))
        .and(path("/api/wireless/multi_ap/config"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    assert!(client.is_logged_in());

    let networks = client.list_multi_ap_networks().await.unwrap();
    assert!(networks.is_empty());
}

#[tokio::test]
async fn test_login_rejected_is_fatal() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "errors": [{ "error": "Incorrect password" }] })),
        )
        .mount(&server)
        .await;

    let result = client.login("admin", &secret("wrong")).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(
                message.contains("Incorrect password"),
                "raw body should be surfaced, got: {message}"
            );
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn test_request_without_login_fails() {
    let (_server, client) = setup().await;

    let result = client.list_static_leases().await;
    assert!(matches!(result, Err(Error::NotLoggedIn)));
}

#[tokio::test]
async fn test_token_expiry_maps_to_session_expired() {
    let (server, client) = setup().await;
    mount_login(&server, "tok-123").await;

    Mock::given(method("GET"))
        .and(path("/api/dhcp/static_leases/ipv4/config"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    let result = client.list_static_leases().await;

    assert!(matches!(result, Err(Error::SessionExpired)));
}

// ── Status handling ─────────────────────────────────────────────────

#[tokio::test]
async fn test_post_accepts_201() {
    let (server, client) = setup().await;
    mount_login(&server, "tok").await;

    Mock::given(method("POST"))
        .and(path("/api/dhcp/static_leases/ipv4/config"))
        .and(body_json(json!({
            "data": { "ip": "10.15.20.3", "mac": "aa:bb:cc:dd:ee:ff", "name": "nuc" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    client
        .create_static_lease("10.15.20.3", "aa:bb:cc:dd:ee:ff", "nuc")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unaccepted_status_carries_raw_body() {
    let (server, client) = setup().await;
    mount_login(&server, "tok").await;

    Mock::given(method("POST"))
        .and(path("/api/wireless/multi_ap/config"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({ "errors": [{ "error": "key too short" }] })),
        )
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    let result = client
        .create_multi_ap_network(&json!({ "ssid": "Guest", "key": "x" }))
        .await;

    match result {
        Err(Error::Api { status, ref body }) => {
            assert_eq!(status, 422);
            assert!(body.contains("key too short"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Envelope parsing ────────────────────────────────────────────────

#[tokio::test]
async fn test_collection_get_unwraps_data() {
    let (server, client) = setup().await;
    mount_login(&server, "tok").await;

    Mock::given(method("GET"))
        .and(path("/api/wireless/multi_ap/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": "5", "ssid": "Guest", "enabled": "1" },
                { "id": "7", "ssid": "Lab" }
            ]
        })))
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    let networks = client.list_multi_ap_networks().await.unwrap();

    assert_eq!(networks.len(), 2);
    assert_eq!(networks[0].id, "5");
    assert_eq!(networks[0].ssid, "Guest");
    assert_eq!(networks[1].key, None);
}

#[tokio::test]
async fn test_missing_data_field_is_deserialization_error() {
    let (server, client) = setup().await;
    mount_login(&server, "tok").await;

    Mock::given(method("GET"))
        .and(path("/api/wireless/multi_ap/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    let result = client.list_multi_ap_networks().await;

    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Delete bodies ───────────────────────────────────────────────────

#[tokio::test]
async fn test_single_entry_delete_sends_bare_empty_body() {
    let (server, client) = setup().await;
    mount_login(&server, "tok").await;

    Mock::given(method("DELETE"))
        .and(path("/api/wireless/multi_ap/config/5"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    client.delete_multi_ap_network("5").await.unwrap();
}

#[tokio::test]
async fn test_bulk_delete_wraps_ids_in_data_envelope() {
    let (server, client) = setup().await;
    mount_login(&server, "tok").await;

    Mock::given(method("DELETE"))
        .and(path("/api/wireless/interfaces/config"))
        .and(body_json(json!({ "data": ["3", "4"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    client
        .delete_wireless_interfaces(&["3".to_owned(), "4".to_owned()])
        .await
        .unwrap();
}

// ── Declarative send ────────────────────────────────────────────────

#[tokio::test]
async fn test_send_wraps_payload_in_data_envelope() {
    let (server, client) = setup().await;
    mount_login(&server, "tok").await;

    Mock::given(method("PUT"))
        .and(path("/api/dhcp/servers/ipv4/config/lan"))
        .and(body_json(json!({ "data": { "leasetime": "12h" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.login("admin", &secret("pw")).await.unwrap();
    client
        .send(
            Method::Put,
            "/api/dhcp/servers/ipv4/config/lan",
            &json!({ "leasetime": "12h" }),
        )
        .await
        .unwrap();
}
