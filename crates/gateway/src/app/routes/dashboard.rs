use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    response::Response,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mfs_backend::actions::{
    transactions::{self, HistoryQuery},
    wallet,
};

use crate::app::extract::QueryParams;
use crate::app::{AppState, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(landing))
        .route("/dashboard/transactions", get(history))
        .route("/dashboard/payments", get(payments))
        .route("/dashboard/admins", get(admin_landing))
}

#[derive(Debug, Serialize)]
pub struct Landing {
    pub subject_id: String,
    pub role: &'static str,
    pub balance: Option<Value>,
}

/// Landing page for every role: who the caller is plus their balance.
pub async fn landing(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    // Admins have no personal wallet.
    let balance = if session.role() == mfs_auth::Role::Admin {
        None
    } else {
        match wallet::own(&state.backend, session.token()).await {
            Ok(wallet) => wallet.get("balance").cloned(),
            Err(err) if err.is_unauthorized() => return errors::action_error(&state.cookie, err),
            Err(err) => {
                tracing::warn!(error = %err, "wallet lookup failed for landing page");
                None
            }
        }
    };

    let landing = Landing {
        subject_id: session.subject_id().to_string(),
        role: session.role().as_str(),
        balance,
    };
    errors::action_reply(&state.cookie, Ok(landing))
}

pub async fn history(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    QueryParams(query): QueryParams<HistoryQuery>,
) -> Response {
    let result = transactions::history(&state.backend, session.token(), &query).await;
    errors::action_reply(&state.cookie, result)
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParam {
    #[serde(default)]
    pub page: Option<u32>,
}

/// Incoming payments, business accounts only.
pub async fn payments(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    QueryParams(param): QueryParams<PageParam>,
) -> Response {
    let result = transactions::received_payments(&state.backend, session.token(), param.page).await;
    errors::action_reply(&state.cookie, result)
}

pub async fn admin_landing(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    errors::action_reply(&state.cookie, Ok(session.identity().clone()))
}
