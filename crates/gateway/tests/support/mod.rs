#![allow(dead_code)]

use axum::{
    Json, Router,
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use mfs_gateway::config::{BACKEND_URL_VAR, GatewayConfig, PUBLIC_KEY_VAR};

pub const SIGNING_KEY: &str = include_str!("../../../auth/testdata/signing.pem");
pub const PUBLIC_KEY: &str = include_str!("../../../auth/testdata/signing.pub.pem");
pub const OTHER_SIGNING_KEY: &str = include_str!("../../../auth/testdata/other.pem");

pub fn mint_with(private_pem: &str, claims: Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &claims,
        &EncodingKey::from_rsa_pem(private_pem.as_bytes()).expect("bad test key"),
    )
    .expect("failed to encode jwt")
}

/// A token for `sub`/`role` valid for ten minutes.
pub fn mint(sub: &str, role: &str) -> String {
    let now = Utc::now().timestamp();
    mint_with(SIGNING_KEY, json!({ "sub": sub, "role": role, "iat": now, "exp": now + 600 }))
}

pub fn session_cookie(token: &str) -> String {
    format!("access_token={token}")
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

pub fn location(res: &reqwest::Response) -> Option<&str> {
    res.headers().get("location").and_then(|v| v.to_str().ok())
}

pub fn set_cookie(res: &reqwest::Response) -> Option<&str> {
    res.headers().get("set-cookie").and_then(|v| v.to_str().ok())
}

/// Stand-in for the remote MFS backend.
///
/// Answers login and wallet lookups, echoes every other call back as
/// `data: { method, path, query, authorization, body }`. In `unauthorized`
/// mode every call gets a 401.
pub struct FakeBackend {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeBackend {
    pub async fn spawn(unauthorized: bool) -> Self {
        let app = Router::new().fallback(backend_echo).with_state(unauthorized);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}/api/v1"),
            handle,
        }
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn backend_echo(State(unauthorized): State<bool>, req: Request) -> Response {
    if unauthorized {
        let message = if req.uri().path() == "/api/v1/auth/login" {
            "Invalid phone number or PIN"
        } else {
            "Invalid or expired token"
        };
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response();
    }

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or_default().to_string();
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(req.into_body(), usize::MAX).await.unwrap_or_default();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    let data = match path.as_str() {
        "/api/v1/auth/login" => json!({ "accessToken": mint("u-100", "Consumer") }),
        "/api/v1/wallet/me" => json!({ "balance": 1500 }),
        _ => json!({
            "method": method,
            "path": path,
            "query": query,
            "authorization": authorization,
            "body": body,
        }),
    };
    Json(json!({ "success": true, "data": data })).into_response()
}

/// The real gateway router on an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(backend_url: &str) -> Self {
        let backend_url = backend_url.to_string();
        let config = GatewayConfig::from_lookup(move |name| match name {
            PUBLIC_KEY_VAR => Some(PUBLIC_KEY.to_string()),
            BACKEND_URL_VAR => Some(backend_url.clone()),
            _ => None,
        })
        .expect("test config");

        let app = mfs_gateway::app::build_app(config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
