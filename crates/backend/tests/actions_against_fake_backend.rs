use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch, post},
};
use mfs_backend::{
    ActionError, BackendClient, BackendError, PageQuery,
    actions::{agents, auth, transactions, wallet},
};
use mfs_core::ValidationError;
use serde_json::{Value, json};

/// What the fake backend saw on its last request.
#[derive(Debug, Default, Clone)]
struct Seen {
    authorization: Option<String>,
    body: Option<Value>,
    query: Vec<(String, String)>,
    hits: usize,
}

type Shared = Arc<Mutex<Seen>>;

fn record(seen: &Shared, headers: &HeaderMap, body: Option<Value>, query: Vec<(String, String)>) {
    let mut s = seen.lock().unwrap();
    s.authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    s.body = body;
    s.query = query;
    s.hits += 1;
}

async fn wallet_me(State(seen): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    record(&seen, &headers, None, vec![]);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer good-token") => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": { "balance": 1500 } })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "jwt expired" })),
        ),
    }
}

async fn login(State(seen): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let wrong_pin = body["pin"] == "0000";
    record(&seen, &headers, Some(body), vec![]);
    if wrong_pin {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid phone number or PIN" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": { "accessToken": "issued.jwt.token" } })),
    )
}

async fn send_money(State(seen): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    record(&seen, &headers, Some(body), vec![]);
    Json(json!({ "success": false, "message": "Insufficient balance" }))
}

async fn list_agents(
    State(seen): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Value> {
    record(&seen, &headers, None, query);
    Json(json!({ "success": true, "data": { "agents": [], "total": 0 } }))
}

async fn approve_agent(
    State(seen): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    record(&seen, &headers, None, vec![]);
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Agent not found" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": { "id": id, "status": "approved" } })),
    )
}

struct FakeBackend {
    client: BackendClient,
    seen: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeBackend {
    async fn spawn() -> Self {
        let seen = Shared::default();
        let app = Router::new()
            .route("/api/v1/wallet/me", get(wallet_me))
            .route("/api/v1/auth/login", post(login))
            .route("/api/v1/transactions/send-money", post(send_money))
            .route("/api/v1/agents", get(list_agents))
            .route("/api/v1/agents/:id/approve", patch(approve_agent))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = BackendClient::new(&format!("http://{addr}/api/v1/")).unwrap();
        Self { client, seen, handle }
    }

    fn seen(&self) -> Seen {
        self.seen.lock().unwrap().clone()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn bearer_token_is_forwarded_and_data_unwrapped() {
    let backend = FakeBackend::spawn().await;

    let data = wallet::own(&backend.client, "good-token").await.unwrap();

    assert_eq!(data["balance"], 1500);
    assert_eq!(backend.seen().authorization.as_deref(), Some("Bearer good-token"));
}

#[tokio::test]
async fn backend_401_surfaces_as_unauthorized() {
    let backend = FakeBackend::spawn().await;

    let err = wallet::own(&backend.client, "stale-token").await.unwrap_err();

    assert_eq!(err, ActionError::Backend(BackendError::Unauthorized("jwt expired".into())));
    assert!(err.is_unauthorized());
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn login_sends_normalized_phone_without_bearer() {
    let backend = FakeBackend::spawn().await;

    let form = auth::LoginForm {
        phone: "+880 1712-345678".into(),
        pin: "12345".into(),
    };
    let session = auth::login(&backend.client, &form).await.unwrap();

    assert_eq!(session.access_token, "issued.jwt.token");
    let seen = backend.seen();
    assert_eq!(seen.authorization, None);
    assert_eq!(seen.body, Some(json!({ "phone": "+8801712345678", "pin": "12345" })));
}

#[tokio::test]
async fn refused_login_keeps_backend_message_and_is_not_a_dead_session() {
    let backend = FakeBackend::spawn().await;

    let form = auth::LoginForm {
        phone: "01712345678".into(),
        pin: "0000".into(),
    };
    let err = auth::login(&backend.client, &form).await.unwrap_err();

    assert_eq!(
        err,
        ActionError::Backend(BackendError::Api {
            status: 401,
            message: "Invalid phone number or PIN".into()
        })
    );
    assert!(!err.is_unauthorized());
    assert_eq!(err.status_code(), 401);
    assert_eq!(err.to_string(), "Invalid phone number or PIN");
}

#[tokio::test]
async fn envelope_failure_is_a_rejection() {
    let backend = FakeBackend::spawn().await;

    let form = transactions::TransferForm {
        phone: "01812345678".into(),
        amount: 500,
        pin: "1234".into(),
    };
    let err = transactions::transfer(&backend.client, "good-token", transactions::TransferKind::SendMoney, &form)
        .await
        .unwrap_err();

    assert_eq!(err, ActionError::Backend(BackendError::Rejected("Insufficient balance".into())));
    assert_eq!(err.to_string(), "Insufficient balance");
    assert_eq!(backend.seen().body.unwrap()["receiverPhone"], "01812345678");
}

#[tokio::test]
async fn invalid_input_never_reaches_the_backend() {
    let backend = FakeBackend::spawn().await;

    let form = transactions::TransferForm {
        phone: "01812345678".into(),
        amount: 500,
        pin: "12".into(),
    };
    let err = transactions::transfer(&backend.client, "good-token", transactions::TransferKind::SendMoney, &form)
        .await
        .unwrap_err();

    assert!(matches!(err, ActionError::Validation(ValidationError::Invalid { field: "pin", .. })));
    assert_eq!(backend.seen().hits, 0);
}

#[tokio::test]
async fn list_forwards_paging_query() {
    let backend = FakeBackend::spawn().await;

    let query = PageQuery {
        page: Some(2),
        limit: Some(25),
        search: Some("dhaka".into()),
    };
    agents::list(&backend.client, "good-token", &query).await.unwrap();

    let seen = backend.seen().query;
    assert!(seen.contains(&("page".into(), "2".into())));
    assert!(seen.contains(&("limit".into(), "25".into())));
    assert!(seen.contains(&("search".into(), "dhaka".into())));
}

#[tokio::test]
async fn backend_4xx_keeps_status_and_message() {
    let backend = FakeBackend::spawn().await;

    let ok = agents::transition(&backend.client, "good-token", "a-42", agents::AgentTransition::Approve)
        .await
        .unwrap();
    assert_eq!(ok["status"], "approved");

    let err = agents::transition(&backend.client, "good-token", "missing", agents::AgentTransition::Approve)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "Agent not found");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let client = BackendClient::new("http://127.0.0.1:1/api/v1").unwrap();

    let err = wallet::own(&client, "good-token").await.unwrap_err();

    assert!(matches!(err, ActionError::Backend(BackendError::Network(_))));
    assert_eq!(err.status_code(), 502);
}
