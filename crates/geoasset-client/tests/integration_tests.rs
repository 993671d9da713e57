//! Integration tests for geoasset-client
//!
//! These tests spin up a real GeoAsset server and use the client to interact with it.
//! This ensures the client stays in sync with the API.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use geoasset_api::{create_router, AppState};
use geoasset_client::testing::TestServer;
use geoasset_client::{Asset, AssetClientError, StoreEvent};
use geoasset_core::AssetStore;
use pretty_assertions::assert_eq;

const TWO_ASSETS: &str = r#"[
    {"address":"1 Main St","latitude":40.0,"longitude":-73.0},
    {"address":"2 Side Rd","latitude":41.5,"longitude":-74.25}
]"#;

async fn create_test_server() -> TestServer {
    let state = AppState::new(Arc::new(AssetStore::new()));
    TestServer::start(create_router(state))
        .await
        .expect("Failed to start test server")
}

// =============================================================================
// Upload & List
// =============================================================================

#[tokio::test]
async fn test_upload_and_list() {
    let server = create_test_server().await;
    let client = &server.client;

    let result = server
        .upload_json("acme", TWO_ASSETS)
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.count, 2);

    let assets = client.list_assets(Some("acme")).await.unwrap();
    assert_eq!(
        assets,
        vec![
            Asset {
                address: "1 Main St".into(),
                latitude: 40.0,
                longitude: -73.0,
                company_id: "acme".into(),
            },
            Asset {
                address: "2 Side Rd".into(),
                latitude: 41.5,
                longitude: -74.25,
                company_id: "acme".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_list_all_companies() {
    let server = create_test_server().await;
    let client = &server.client;

    server
        .upload_json("globex", TWO_ASSETS)
        .await
        .unwrap();
    server
        .upload_json("acme", TWO_ASSETS)
        .await
        .unwrap();

    let companies: Vec<String> = client
        .list_assets(None)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.company_id)
        .collect();
    assert_eq!(companies, vec!["acme", "acme", "globex", "globex"]);
}

#[tokio::test]
async fn test_company_has_assets() {
    let server = create_test_server().await;
    let client = &server.client;

    assert!(!client.company_has_assets("acme").await.unwrap());

    server
        .upload_json("acme", TWO_ASSETS)
        .await
        .unwrap();
    assert!(client.company_has_assets("acme").await.unwrap());
    assert!(!client.company_has_assets("globex").await.unwrap());
}

#[tokio::test]
async fn test_company_id_with_reserved_characters() {
    let server = create_test_server().await;
    let client = &server.client;

    client
        .upload_assets("a&b c", "assets.json", TWO_ASSETS.as_bytes().to_vec())
        .await
        .unwrap();

    let assets = client.list_assets(Some("a&b c")).await.unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].company_id, "a&b c");
}

#[tokio::test]
async fn test_upload_file_from_disk() {
    let server = create_test_server().await;

    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    file.write_all(TWO_ASSETS.as_bytes()).unwrap();

    let result = server.client.upload_file("acme", file.path()).await.unwrap();
    assert_eq!(result.count, 2);
}

#[tokio::test]
async fn test_upload_missing_file_on_disk() {
    let server = create_test_server().await;

    let err = server
        .client
        .upload_file("acme", "/nonexistent/assets.json")
        .await
        .unwrap_err();
    assert!(matches!(err, AssetClientError::IoError(_)));
}

// =============================================================================
// Error Mapping
// =============================================================================

#[tokio::test]
async fn test_rejected_upload_message() {
    let server = create_test_server().await;

    let err = server
        .client
        .upload_assets("acme", "assets.json", b"not json".to_vec())
        .await
        .unwrap_err();

    match err {
        AssetClientError::Rejected(message) => {
            assert_eq!(message, "Invalid file format or structure")
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_company_rejected() {
    let server = create_test_server().await;

    let err = server
        .client
        .upload_assets("", "assets.json", TWO_ASSETS.as_bytes().to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Missing required fields");
}

// =============================================================================
// Change Feed
// =============================================================================

#[tokio::test]
async fn test_watch_receives_replacements() {
    let server = create_test_server().await;
    let client = &server.client;

    let mut feed = client.watch(None).await.unwrap();

    server
        .upload_json("acme", TWO_ASSETS)
        .await
        .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(5), feed.next())
        .await
        .expect("timed out waiting for event")
        .expect("feed ended")
        .unwrap();

    assert_eq!(
        event,
        StoreEvent::AssetsReplaced {
            company_id: "acme".into(),
            count: 2
        }
    );
}

#[tokio::test]
async fn test_watch_filters_by_company() {
    let server = create_test_server().await;
    let client = &server.client;

    let mut feed = client.watch(Some("acme")).await.unwrap();

    server
        .upload_json("globex", TWO_ASSETS)
        .await
        .unwrap();
    client
        .upload_assets("acme", "a.json", b"[]".to_vec())
        .await
        .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(5), feed.next_event())
        .await
        .expect("timed out waiting for event")
        .expect("feed ended")
        .unwrap();

    assert_eq!(event.company_id(), "acme");
    assert_eq!(
        event,
        StoreEvent::AssetsReplaced {
            company_id: "acme".into(),
            count: 0
        }
    );
}

#[tokio::test]
async fn test_failed_upload_emits_nothing() {
    let server = create_test_server().await;
    let client = &server.client;

    let mut feed = client.watch(None).await.unwrap();

    let _ = client
        .upload_assets("acme", "assets.json", b"not json".to_vec())
        .await;

    let waited = tokio::time::timeout(Duration::from_millis(200), feed.next()).await;
    assert!(waited.is_err(), "unexpected event: {:?}", waited);
}
