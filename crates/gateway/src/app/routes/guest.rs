//! Guest entry: login, registration, logout.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde_json::json;

use mfs_auth::RedirectTarget;
use mfs_backend::actions::auth::{self, LoginForm, RegisterForm};

use crate::app::extract::FormBody;
use crate::app::{AppState, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", post(logout))
}

pub async fn login_page() -> impl IntoResponse {
    Json(json!({ "page": "login", "fields": ["phone", "pin"] }))
}

pub async fn register_page() -> impl IntoResponse {
    Json(json!({
        "page": "register",
        "fields": ["name", "phone", "pin", "kind", "email"],
        "kinds": ["Consumer", "Agent", "Business"],
    }))
}

/// Exchange phone + PIN for a session credential, store it in the cookie and
/// send the caller to the landing page.
pub async fn login(Extension(state): Extension<Arc<AppState>>, FormBody(form): FormBody<LoginForm>) -> Response {
    let session = match auth::login(&state.backend, &form).await {
        Ok(session) => session,
        Err(err) => return errors::action_error(&state.cookie, err),
    };

    let Some(cookie) = state.cookie.issue(&session.access_token) else {
        tracing::warn!("backend issued a credential that cannot be stored in a cookie");
        return errors::json_error(StatusCode::BAD_GATEWAY, "invalid_credential", "login failed");
    };

    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to(RedirectTarget::Landing.path()),
    )
        .into_response()
}

pub async fn register(Extension(state): Extension<Arc<AppState>>, FormBody(form): FormBody<RegisterForm>) -> Response {
    errors::action_reply(&state.cookie, auth::register(&state.backend, &form).await)
}

/// End the session. The cookie is cleared even if the backend call fails.
pub async fn logout(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Err(err) = auth::logout(&state.backend, session.token()).await {
        tracing::warn!(error = %err, "backend logout failed; clearing local session anyway");
    }
    (
        [(header::SET_COOKIE, state.cookie.clear())],
        Redirect::to(RedirectTarget::GuestEntry.path()),
    )
        .into_response()
}
