//! HTTP application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers (one file per dashboard area)
//! - `errors.rs`: mapping action outcomes to responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use mfs_auth::RouteTable;
use mfs_backend::BackendClient;

use crate::config::GatewayConfig;
use crate::middleware;
use crate::session::SessionCookie;

pub mod errors;
pub mod extract;
pub mod routes;

/// Per-process state handed to handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub cookie: SessionCookie,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: GatewayConfig) -> Router {
    let gate = middleware::GateState {
        verifier: Arc::new(config.verifier),
        routes: Arc::new(RouteTable::mfs_default()),
        cookie: config.cookie,
    };
    let state = Arc::new(AppState {
        backend: config.backend,
        cookie: config.cookie,
    });

    // Everything except `/health` sits behind the gate, including unknown paths.
    let gated = routes::router()
        .fallback(routes::system::not_found)
        .layer(Extension(state))
        .layer(axum::middleware::from_fn_with_state(gate, middleware::access_gate));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(gated)
}
