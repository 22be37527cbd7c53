//! Admin area: agents, consumers, billers, system wallet, analytics.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path},
    response::Response,
    routing::{get, patch, put},
};

use mfs_backend::PageQuery;
use mfs_backend::actions::{
    agents::{self, AgentTransition},
    analytics,
    billers::{self, BillerForm},
    consumers, wallet,
};

use crate::app::extract::{JsonBody, QueryParams};
use crate::app::{AppState, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard/agents", get(list_agents))
        .route("/dashboard/agents/:id", get(get_agent))
        .route("/dashboard/agents/:id/approve", patch(approve_agent))
        .route("/dashboard/agents/:id/block", patch(block_agent))
        .route("/dashboard/agents/:id/unblock", patch(unblock_agent))
        .route("/dashboard/consumers", get(list_consumers))
        .route("/dashboard/consumers/:id", get(get_consumer))
        .route("/dashboard/consumers/:id/block", patch(block_consumer))
        .route("/dashboard/consumers/:id/unblock", patch(unblock_consumer))
        .route("/dashboard/billers", get(list_billers).post(create_biller))
        .route("/dashboard/billers/:id", put(update_biller).delete(delete_biller))
        .route("/dashboard/system-wallet", get(system_wallet))
        .route("/dashboard/analytics", get(overview))
}

pub async fn list_agents(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Response {
    errors::action_reply(&state.cookie, agents::list(&state.backend, session.token(), &query).await)
}

pub async fn get_agent(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    errors::action_reply(&state.cookie, agents::get(&state.backend, session.token(), &id).await)
}

async fn transition_agent(
    state: &AppState,
    session: &SessionContext,
    id: &str,
    transition: AgentTransition,
) -> Response {
    let result = agents::transition(&state.backend, session.token(), id, transition).await;
    if result.is_ok() {
        tracing::info!(agent = %id, ?transition, admin = %session.subject_id(), "agent status changed");
    }
    errors::action_reply(&state.cookie, result)
}

pub async fn approve_agent(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    transition_agent(&state, &session, &id, AgentTransition::Approve).await
}

pub async fn block_agent(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    transition_agent(&state, &session, &id, AgentTransition::Block).await
}

pub async fn unblock_agent(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    transition_agent(&state, &session, &id, AgentTransition::Unblock).await
}

pub async fn list_consumers(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Response {
    errors::action_reply(&state.cookie, consumers::list(&state.backend, session.token(), &query).await)
}

pub async fn get_consumer(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    errors::action_reply(&state.cookie, consumers::get(&state.backend, session.token(), &id).await)
}

async fn set_consumer_blocked(state: &AppState, session: &SessionContext, id: &str, blocked: bool) -> Response {
    let result = consumers::set_blocked(&state.backend, session.token(), id, blocked).await;
    if result.is_ok() {
        tracing::info!(consumer = %id, blocked, admin = %session.subject_id(), "consumer status changed");
    }
    errors::action_reply(&state.cookie, result)
}

pub async fn block_consumer(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    set_consumer_blocked(&state, &session, &id, true).await
}

pub async fn unblock_consumer(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    set_consumer_blocked(&state, &session, &id, false).await
}

pub async fn list_billers(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    errors::action_reply(&state.cookie, billers::list(&state.backend, session.token()).await)
}

pub async fn create_biller(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    JsonBody(form): JsonBody<BillerForm>,
) -> Response {
    errors::action_reply(&state.cookie, billers::create(&state.backend, session.token(), &form).await)
}

pub async fn update_biller(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    JsonBody(form): JsonBody<BillerForm>,
) -> Response {
    let result = billers::update(&state.backend, session.token(), &id, &form).await;
    errors::action_reply(&state.cookie, result)
}

pub async fn delete_biller(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Response {
    errors::action_reply(&state.cookie, billers::delete(&state.backend, session.token(), &id).await)
}

pub async fn system_wallet(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    errors::action_reply(&state.cookie, wallet::system(&state.backend, session.token()).await)
}

pub async fn overview(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    errors::action_reply(&state.cookie, analytics::overview(&state.backend, session.token()).await)
}
