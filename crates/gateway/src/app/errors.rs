use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use mfs_backend::{ActionError, ActionResponse, ActionResult};

use crate::session::SessionCookie;

/// Render an action outcome as `{ success, data }` / `{ success: false, error }`.
pub fn action_reply<T: Serialize>(cookie: &SessionCookie, result: ActionResult<T>) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, Json(ActionResponse::ok(data))).into_response(),
        Err(err) => action_error(cookie, err),
    }
}

/// Failure half of [`action_reply`]. A backend 401 also removes the session
/// cookie so the next request reaches the gate without a credential.
pub fn action_error(cookie: &SessionCookie, err: ActionError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = Json(ActionResponse::<()>::err(err.to_string()));

    if err.is_unauthorized() {
        tracing::warn!("backend rejected session credential; clearing it");
        return (status, [(header::SET_COOKIE, cookie.clear())], body).into_response();
    }
    if status.is_server_error() {
        tracing::warn!(error = %err, status = status.as_u16(), "backend action failed");
    }
    (status, body).into_response()
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}
