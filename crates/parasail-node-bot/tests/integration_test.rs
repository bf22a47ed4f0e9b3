/*
[INPUT]:  Mock Parasail server and a temporary config file
[OUTPUT]: End-to-end startup checks through the real HTTP client and ConfigStore
[POS]:    Integration tests for parasail-node-bot
[UPDATE]: When changing the startup flow or the persisted config format
*/

use std::sync::Arc;

use parasail_adapter::{ClientConfig, ParasailClient, SessionManager};
use parasail_node_bot::{ConfigStore, ScheduleTiming, Scheduler, TracingSink};
use tempfile::TempDir;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PK: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

fn write_config(dir: &TempDir, value: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

fn scheduler_for(server: &MockServer, store: Arc<ConfigStore>) -> Scheduler {
    let client =
        ParasailClient::with_config_and_base_url(ClientConfig::default(), &server.uri()).unwrap();
    let config = store.config().unwrap();
    let manager = SessionManager::new(
        Arc::new(client),
        config.private_key.clone(),
        config.session(),
        store,
    );
    Scheduler::new(
        Arc::new(manager),
        Arc::new(TracingSink),
        ScheduleTiming::default(),
    )
}

async fn mount_node_endpoints(server: &MockServer, token: &str) {
    let bearer = format!("Bearer {token}");
    Mock::given(method("POST"))
        .and(path("/v1/node/onboard"))
        .and(header("authorization", bearer.as_str()))
        .and(body_json(serde_json::json!({ "address": ADDRESS })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/node/check_in"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/node/node_stats"))
        .and(query_param("address", ADDRESS))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "has_node": true,
                "node_address": "0xnode",
                "points": "42.5",
                "card_count": 1
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fresh_config_is_written_back_after_verify() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/verify"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "token": "jwt-1" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_node_endpoints(&server, "jwt-1").await;

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, serde_json::json!({ "privateKey": PK }));
    let store = Arc::new(ConfigStore::load(&path).unwrap());

    scheduler_for(&server, store).start().await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["privateKey"], PK);
    assert_eq!(written["wallet_address"], ADDRESS);
    assert_eq!(written["bearer_token"], "jwt-1");
}

#[tokio::test]
async fn test_persisted_token_is_used_without_verify() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/verify"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_node_endpoints(&server, "persisted").await;

    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        serde_json::json!({
            "privateKey": PK,
            "wallet_address": ADDRESS,
            "bearer_token": "persisted"
        }),
    );
    let store = Arc::new(ConfigStore::load(&path).unwrap());

    assert_ok!(scheduler_for(&server, store).start().await);
}

#[tokio::test]
async fn test_startup_stops_at_first_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/node/onboard"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/node/check_in"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        serde_json::json!({
            "privateKey": PK,
            "wallet_address": ADDRESS,
            "bearer_token": "persisted"
        }),
    );
    let store = Arc::new(ConfigStore::load(&path).unwrap());

    let err = scheduler_for(&server, store).start().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_token_without_address_onboards_with_derived_address() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/verify"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_node_endpoints(&server, "persisted").await;

    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        serde_json::json!({
            "privateKey": PK,
            "bearer_token": "persisted"
        }),
    );
    let store = Arc::new(ConfigStore::load(&path).unwrap());

    assert_ok!(scheduler_for(&server, store).start().await);
}
