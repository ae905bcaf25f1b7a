//! HTTP surface tests driven through the router with `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use journal_chain::LedgerError;
use journal_nullables::{NullIdeaStore, NullLedger};
use journal_rpc::{create_router, RpcServer};
use journal_service::{IdeaService, LedgerSettings};
use journal_store::IdeaStore;
use journal_store_sqlite::SqliteDatabase;
use journal_types::AccountAddress;
use serde_json::{json, Value};
use tower::ServiceExt;

fn local_service() -> Arc<IdeaService> {
    let db = SqliteDatabase::open_in_memory().unwrap();
    Arc::new(IdeaService::local(Arc::new(db.idea_store())).unwrap())
}

fn ledger_service(
    settings: LedgerSettings,
) -> (Arc<IdeaService>, Arc<NullIdeaStore>, Arc<NullLedger>) {
    let store = Arc::new(NullIdeaStore::new());
    let ledger = Arc::new(NullLedger::with_signer());
    let service = IdeaService::ledger(store.clone(), ledger.clone(), settings).unwrap();
    (Arc::new(service), store, ledger)
}

fn contract_settings() -> LedgerSettings {
    LedgerSettings {
        contract_address: Some(AccountAddress::new([0xcc; 32])),
        ..LedgerSettings::default()
    }
}

async fn call(service: &Arc<IdeaService>, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router(Arc::clone(service))
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn smoke_flow_in_local_mode() {
    let service = local_service();

    let (status, body) = call(&service, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "externalMode": false}));

    let (status, created) = call(
        &service,
        post_json("/api/ideas", json!({"title": "Test", "description": "Desc"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["votes"], 0);
    assert_eq!(created["author"], "0x_mok");
    assert!(created["timestamp"].as_u64().unwrap() > 0);

    let (status, list) = call(&service, get("/api/ideas")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([created.clone()]));

    let (status, voted) = call(&service, post_empty("/api/ideas/1/vote")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(voted["votes"], 1);

    let (status, fetched) = call(&service, get("/api/ideas/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, voted);

    let (status, missing) = call(&service, get("/api/ideas/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["error"], "idea 999 not found");
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let service = local_service();
    let (status, body) = call(&service, post_json("/api/ideas", json!({"title": "only"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title and description are required");

    let (_, list) = call(&service, get("/api/ideas")).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let service = local_service();
    let request = Request::builder()
        .method("POST")
        .uri("/api/ideas")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = call(&service, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let service = local_service();
    let (status, _) = call(&service, get("/api/ideas/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&service, post_empty("/api/ideas/abc/vote")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vote_on_missing_idea_is_not_found() {
    let service = local_service();
    let (status, _) = call(&service, post_empty("/api/ideas/42/vote")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ledger_read_in_local_mode_is_bad_request() {
    let service = local_service();
    let (status, body) = call(&service, get("/api/ledger/ideas/1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("wrong mode"));
}

#[tokio::test]
async fn external_mode_reads_are_not_implemented() {
    let (service, _, _) = ledger_service(contract_settings());

    let (_, health) = call(&service, get("/api/health")).await;
    assert_eq!(health["externalMode"], true);

    let (status, _) = call(&service, get("/api/ideas")).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    let (status, _) = call(&service, get("/api/ideas/1")).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn external_submit_without_contract_is_bad_request() {
    let (service, store, _) = ledger_service(LedgerSettings::default());
    let (status, body) = call(
        &service,
        post_json("/api/ideas", json!({"title": "Test", "description": "Desc"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "contract address is not configured");
    assert_eq!(store.list().unwrap().len(), 0);
}

#[tokio::test]
async fn external_submit_returns_tx_hash() {
    let (service, store, ledger) = ledger_service(contract_settings());
    let (status, body) = call(
        &service,
        post_json(
            "/api/ideas",
            json!({"title": "Test", "description": "Desc", "journalOwner": "0x2"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["txHash"], NullLedger::hash_for(1).to_string());
    assert_eq!(store.list().unwrap().len(), 1);

    let owner: AccountAddress = "0x2".parse().unwrap();
    assert_eq!(ledger.calls()[0].args[0], json!(owner.to_string()));

    let (status, body) = call(&service, post_empty("/api/ideas/1/vote")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["txHash"], NullLedger::hash_for(2).to_string());
}

#[tokio::test]
async fn adapter_failure_is_server_error_with_detail() {
    let (service, store, ledger) = ledger_service(contract_settings());
    ledger.fail_with(|| LedgerError::Http {
        status: 500,
        message: "node unavailable".into(),
    });

    let (status, body) = call(
        &service,
        post_json("/api/ideas", json!({"title": "t", "description": "d"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "ledger submit failed");
    assert!(body["detail"].as_str().unwrap().contains("node unavailable"));
    assert_eq!(store.list().unwrap().len(), 0);
}

#[tokio::test]
async fn external_vote_without_contract_is_bad_request() {
    let (service, _, ledger) = ledger_service(LedgerSettings::default());
    let (status, body) = call(&service, post_empty("/api/ideas/1/vote")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "contract address is not configured");
    assert!(ledger.calls().is_empty());
}

#[tokio::test]
async fn external_vote_adapter_failure_is_server_error_with_detail() {
    let (service, _, ledger) = ledger_service(contract_settings());
    ledger.fail_with(|| LedgerError::Rejected {
        hash: "0x9".into(),
        vm_status: "EIDEA_NOT_FOUND".into(),
    });

    let (status, body) = call(&service, post_empty("/api/ideas/7/vote")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "ledger vote failed");
    assert!(body["detail"].as_str().unwrap().contains("EIDEA_NOT_FOUND"));
    assert_eq!(ledger.calls()[0].args[1], json!("7"));
}

#[tokio::test]
async fn ledger_read_returns_raw_resource() {
    let (service, _, ledger) = ledger_service(contract_settings());
    let (status, _) = call(&service, get("/api/ledger/ideas/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let resource_type = format!("{}::OpenJournal::Journal", AccountAddress::new([0xcc; 32]));
    ledger.put_resource(
        AccountAddress::new([0xaa; 32]),
        resource_type.clone(),
        json!({"ideas": []}),
    );
    let (status, body) = call(&service, get("/api/ledger/ideas/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resource"]["type"], resource_type);
    assert_eq!(body["resource"]["data"], json!({"ideas": []}));
}

#[tokio::test]
async fn server_stops_on_shutdown_signal() {
    let (tx, rx) = tokio::sync::broadcast::channel(1);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = RpcServer::new(0, local_service());
    let handle = tokio::spawn(async move { server.serve(listener, rx).await });

    tx.send(()).unwrap();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
