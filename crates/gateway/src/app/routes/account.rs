use std::sync::Arc;

use axum::{Router, extract::Extension, response::Response, routing::get};

use mfs_backend::actions::auth::{self, ProfileForm};

use crate::app::extract::JsonBody;
use crate::app::{AppState, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new().route("/dashboard/account/update-profile", get(profile).patch(update_profile))
}

pub async fn profile(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    errors::action_reply(&state.cookie, auth::me(&state.backend, session.token()).await)
}

pub async fn update_profile(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    JsonBody(form): JsonBody<ProfileForm>,
) -> Response {
    let result = auth::update_profile(&state.backend, session.token(), &form).await;
    errors::action_reply(&state.cookie, result)
}
