//! AptosClient against an in-process mock fullnode.
//!
//! The mock implements just enough of the REST API to walk the adapter
//! through sequence lookup → encode → sign → submit → poll, plus resource
//! listing, so each failure path can be scripted.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use journal_chain::{
    AccountCredential, AptosClient, AptosConfig, EntryFunctionId, LedgerClient, LedgerError,
};
use journal_crypto::verify_signature;
use journal_types::{AccountAddress, Signature};

const SIGNING_MESSAGE: &[u8] = b"mock signing message";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Commit,
    Reject,
    NeverCommit,
}

struct MockNode {
    outcome: Outcome,
    account_exists: bool,
    reject_encode: bool,
    resources: Vec<Value>,
    submitted: Mutex<Vec<Value>>,
    polls: Mutex<u32>,
}

impl MockNode {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            account_exists: true,
            reject_encode: false,
            resources: Vec::new(),
            submitted: Mutex::new(Vec::new()),
            polls: Mutex::new(0),
        }
    }
}

type Mock = Arc<MockNode>;

fn tx_hash() -> String {
    format!("0x{}", "ab".repeat(32))
}

async fn account(State(node): State<Mock>, Path(_addr): Path<String>) -> Response {
    if !node.account_exists {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Account not found", "error_code": "account_not_found"})),
        )
            .into_response();
    }
    Json(json!({"sequence_number": "5", "authentication_key": "0x00"})).into_response()
}

async fn resources(State(node): State<Mock>, Path(_addr): Path<String>) -> Response {
    if !node.account_exists {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Account not found"})),
        )
            .into_response();
    }
    Json(Value::Array(node.resources.clone())).into_response()
}

async fn encode(State(node): State<Mock>, Json(body): Json<Value>) -> Response {
    if node.reject_encode {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid transaction: bad argument", "error_code": "invalid_input"})),
        )
            .into_response();
    }
    node.submitted.lock().unwrap().push(body);
    Json(json!(format!("0x{}", hex::encode(SIGNING_MESSAGE)))).into_response()
}

async fn submit(State(node): State<Mock>, Json(body): Json<Value>) -> Response {
    node.submitted.lock().unwrap().push(body);
    (StatusCode::ACCEPTED, Json(json!({"hash": tx_hash()}))).into_response()
}

async fn by_hash(State(node): State<Mock>, Path(hash): Path<String>) -> Response {
    let polls = {
        let mut polls = node.polls.lock().unwrap();
        *polls += 1;
        *polls
    };
    if polls == 1 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Transaction not found"})),
        )
            .into_response();
    }
    let view = match node.outcome {
        Outcome::NeverCommit => json!({"type": "pending_transaction", "hash": hash}),
        _ if polls == 2 => json!({"type": "pending_transaction", "hash": hash}),
        Outcome::Commit => json!({
            "type": "user_transaction", "hash": hash, "version": "1234",
            "success": true, "vm_status": "Executed successfully"
        }),
        Outcome::Reject => json!({
            "type": "user_transaction", "hash": hash, "version": "1235",
            "success": false, "vm_status": "Move abort in 0x1::OpenJournal: E_NO_JOURNAL"
        }),
    };
    Json(view).into_response()
}

async fn spawn_mock(node: MockNode) -> (Mock, String) {
    let node = Arc::new(node);
    let app = Router::new()
        .route("/v1/accounts/:addr", get(account))
        .route("/v1/accounts/:addr/resources", get(resources))
        .route("/v1/transactions/encode_submission", post(encode))
        .route("/v1/transactions", post(submit))
        .route("/v1/transactions/by_hash/:hash", get(by_hash))
        .with_state(Arc::clone(&node));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (node, format!("http://{addr}"))
}

fn config(url: String) -> AptosConfig {
    AptosConfig {
        node_url: url,
        confirmation_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(10),
        ..AptosConfig::default()
    }
}

fn credential() -> AccountCredential {
    AccountCredential::from_hex(&"42".repeat(32)).unwrap()
}

fn submit_idea() -> EntryFunctionId {
    EntryFunctionId::new(AccountAddress::new([0xcc; 32]), "OpenJournal", "submit_idea")
}

#[tokio::test]
async fn submit_signs_and_waits_for_commit() {
    let (node, url) = spawn_mock(MockNode::new(Outcome::Commit)).await;
    let cred = credential();
    let signer = cred.address();
    let public_key = cred.public_key().clone();
    let client = AptosClient::new(config(url), Some(cred)).unwrap();

    let handle = client
        .submit_entry(&submit_idea(), vec![json!("0x1"), json!("Test"), json!("Desc")])
        .await
        .unwrap();

    assert_eq!(handle.hash.to_string(), tx_hash());
    assert_eq!(handle.version, Some(1234));

    let submitted = node.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 2, "encode + submit");
    let unsigned = &submitted[0];
    let signed = &submitted[1];

    assert!(unsigned.get("signature").is_none());
    assert_eq!(signed["sender"], signer.to_string());
    assert_eq!(signed["sequence_number"], "5");
    assert_eq!(signed["payload"]["function"], submit_idea().to_string());
    assert_eq!(signed["payload"]["arguments"], json!(["0x1", "Test", "Desc"]));

    let sig = &signed["signature"];
    assert_eq!(sig["type"], "ed25519_signature");
    assert_eq!(sig["public_key"], public_key.to_hex());
    let sig_bytes = hex::decode(sig["signature"].as_str().unwrap().trim_start_matches("0x")).unwrap();
    let signature = Signature(sig_bytes.try_into().unwrap());
    assert!(verify_signature(SIGNING_MESSAGE, &signature, &public_key));
}

#[tokio::test]
async fn rejected_transaction_surfaces_vm_status() {
    let (_node, url) = spawn_mock(MockNode::new(Outcome::Reject)).await;
    let client = AptosClient::new(config(url), Some(credential())).unwrap();

    let err = client.submit_entry(&submit_idea(), vec![]).await.unwrap_err();
    match err {
        LedgerError::Rejected { vm_status, .. } => assert!(vm_status.contains("E_NO_JOURNAL")),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn confirmation_wait_is_bounded() {
    let (_node, url) = spawn_mock(MockNode::new(Outcome::NeverCommit)).await;
    let cfg = AptosConfig {
        confirmation_timeout: Duration::from_millis(200),
        ..config(url)
    };
    let client = AptosClient::new(cfg, Some(credential())).unwrap();

    let err = client.submit_entry(&submit_idea(), vec![]).await.unwrap_err();
    assert!(matches!(err, LedgerError::Timeout(_)));
}

#[tokio::test]
async fn node_error_message_is_preserved() {
    let mut mock = MockNode::new(Outcome::Commit);
    mock.reject_encode = true;
    let (_node, url) = spawn_mock(mock).await;
    let client = AptosClient::new(config(url), Some(credential())).unwrap();

    let err = client.submit_entry(&submit_idea(), vec![]).await.unwrap_err();
    match err {
        LedgerError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid transaction: bad argument");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn read_resource_selects_matching_type() {
    let mut mock = MockNode::new(Outcome::Commit);
    mock.resources = vec![
        json!({"type": "0x1::account::Account", "data": {"sequence_number": "5"}}),
        json!({"type": "0xcc::OpenJournal::Journal", "data": {"ideas": [], "next_idea_id": "1"}}),
    ];
    let (_node, url) = spawn_mock(mock).await;
    let client = AptosClient::new(config(url), None).unwrap();
    let owner = AccountAddress::new([0xcc; 32]);

    let found = client
        .read_resource(&owner, "0xcc::OpenJournal::Journal")
        .await
        .unwrap();
    assert_eq!(found.data["next_idea_id"], "1");

    let missing = client.read_resource(&owner, "0xcc::OpenJournal::Other").await;
    assert!(matches!(missing, Err(LedgerError::ResourceNotFound(_))));
}

#[tokio::test]
async fn read_resource_on_unknown_account_is_not_found() {
    let mut mock = MockNode::new(Outcome::Commit);
    mock.account_exists = false;
    let (_node, url) = spawn_mock(mock).await;
    let client = AptosClient::new(config(url), None).unwrap();

    let result = client
        .read_resource(&AccountAddress::new([1; 32]), "0x1::OpenJournal::Journal")
        .await;
    assert!(matches!(result, Err(LedgerError::ResourceNotFound(_))));
}
