#![allow(clippy::unwrap_used)]
// Integration tests for `WolClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wolman_api::models::{HostCreate, HostUpdate};
use wolman_api::{Error, WolClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, WolClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = WolClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Host tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_hosts() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "ip_address": "192.168.1.10",
                "mac_address": "AA:BB:CC:DD:EE:FF",
                "hostname": "srv",
                "status": "online",
                "wol_enabled": true,
                "inference_confidence": 85
            },
            {
                "ip_address": "192.168.1.2",
                "mac_address": null,
                "status": "offline",
                "wol_enabled": false
            }
        ])))
        .mount(&server)
        .await;

    let hosts = client.list_hosts().await.unwrap();
    assert_eq!(hosts.len(), 2);
    assert_eq!(hosts[0].hostname.as_deref(), Some("srv"));
    assert_eq!(hosts[0].inference_confidence, Some(85.0));
    assert!(hosts[0].wol_enabled);
    assert_eq!(hosts[1].mac_address, None);
    assert_eq!(hosts[1].hostname, None);
}

#[tokio::test]
async fn test_wol_roster() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/hosts/wol-registered"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hosts": [{ "ip_address": "10.0.0.5", "wol_enabled": true }],
            "count": 1,
            "total_hosts": 7
        })))
        .mount(&server)
        .await;

    let roster = client.list_wol_registered().await.unwrap();
    assert_eq!(roster.hosts.len(), 1);
    assert_eq!(roster.count, Some(1));
    assert_eq!(roster.total_hosts, Some(7));
}

#[tokio::test]
async fn test_create_host_sends_explicit_wol_flag() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/hosts"))
        .and(body_json(json!({
            "ip_address": "10.0.0.9",
            "hostname": "nas",
            "wol_enabled": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip_address": "10.0.0.9",
            "hostname": "nas",
            "wol_enabled": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_host(&HostCreate {
            ip_address: "10.0.0.9".into(),
            hostname: Some("nas".into()),
            ..HostCreate::default()
        })
        .await
        .unwrap();
    assert_eq!(created.ip_address, "10.0.0.9");
}

#[tokio::test]
async fn test_create_host_conflict_carries_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/hosts"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "detail": "Host already exists" })),
        )
        .mount(&server)
        .await;

    let err = client
        .create_host(&HostCreate {
            ip_address: "10.0.0.9".into(),
            ..HostCreate::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 409, .. }), "got: {err:?}");
    assert_eq!(err.detail(), Some("Host already exists"));
}

#[tokio::test]
async fn test_update_host_sends_only_changed_fields() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/hosts/10.0.0.9"))
        .and(body_json(json!({ "hostname": "backup", "notes": "rack 2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip_address": "10.0.0.9",
            "hostname": "backup",
            "notes": "rack 2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = HostUpdate {
        hostname: Some("backup".into()),
        notes: Some("rack 2".into()),
        ..HostUpdate::default()
    };
    let host = client.update_host("10.0.0.9", &update).await.unwrap();
    assert_eq!(host.notes.as_deref(), Some("rack 2"));
}

#[tokio::test]
async fn test_delete_missing_host_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/hosts/10.0.0.99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Host not found" })),
        )
        .mount(&server)
        .await;

    let err = client.delete_host("10.0.0.99").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.detail(), Some("Host not found"));
}

#[tokio::test]
async fn test_register_wol_without_mac_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/hosts/10.0.0.3/register-wol"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Host must have a MAC address to register for WOL"
        })))
        .mount(&server)
        .await;

    let err = client.register_wol("10.0.0.3").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.detail(),
        Some("Host must have a MAC address to register for WOL")
    );
}

#[tokio::test]
async fn test_error_without_detail_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/hosts/10.0.0.3/unregister-wol"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.unregister_wol("10.0.0.3").await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 502, detail: None }));
    assert_eq!(err.to_string(), "API error (HTTP 502): request failed");
}

// ── Discovery / wake tests ──────────────────────────────────────────

#[tokio::test]
async fn test_wake_failure_is_body_level() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/wol/wake/10.0.0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Failed to send WOL packet to 10.0.0.5",
            "ip_address": "10.0.0.5",
            "mac_address": "AA:BB:CC:DD:EE:01"
        })))
        .mount(&server)
        .await;

    let resp = client.wake("10.0.0.5").await.unwrap();
    assert!(!resp.success);
    assert_eq!(resp.message, "Failed to send WOL packet to 10.0.0.5");
}

#[tokio::test]
async fn test_wol_capability_reports_reason() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/wol/test/10.0.0.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip_address": "10.0.0.7",
            "wol_capable": false,
            "reason": "WOL is disabled for this host"
        })))
        .mount(&server)
        .await;

    let resp = client.test_wol("10.0.0.7").await.unwrap();
    assert!(!resp.wol_capable);
    assert_eq!(resp.reason, "WOL is disabled for this host");
    assert_eq!(resp.mac_address, None);
}

#[tokio::test]
async fn test_discover_single_host() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/discovery/discover/10.0.0.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip_address": "10.0.0.7",
            "status": "online",
            "wol_enabled": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/discovery/discover/10.0.0.99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Host not found or not discoverable"
        })))
        .mount(&server)
        .await;

    let host = client.discover_host("10.0.0.7").await.unwrap();
    assert_eq!(host.status.as_deref(), Some("online"));

    let err = client.discover_host("10.0.0.99").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.detail(), Some("Host not found or not discoverable"));
}

#[tokio::test]
async fn test_discovery_status_and_statistics() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/discovery/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running",
            "last_run": "2024-05-01T12:30:00.123456",
            "interval": 300
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/discovery/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_hosts": 3,
            "by_discovery_method": { "arp": 2, "mdns": 1 },
            "by_status": { "online": 3 }
        })))
        .mount(&server)
        .await;

    let status = client.discovery_status().await.unwrap();
    assert_eq!(status.status.as_deref(), Some("running"));
    assert_eq!(status.interval, Some(300));

    let stats = client.discovery_statistics().await.unwrap();
    assert_eq!(stats.total_hosts, Some(3));
    assert_eq!(stats.by_discovery_method.get("arp"), Some(&2));
    assert!(stats.by_device_type.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_hosts().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization, got {other:?}"),
    }
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_tolerated() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let client = WolClient::with_client(reqwest::Client::new(), base_url);

    Mock::given(method("POST"))
        .and(path("/api/v1/discovery/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let found = client.run_discovery().await.unwrap();
    assert!(found.is_empty());
}
