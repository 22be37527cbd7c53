use axum::Router;

pub mod account;
pub mod admin;
pub mod dashboard;
pub mod guest;
pub mod system;
pub mod transfers;

/// Router for every gated path. Role checks already happened in the gate.
pub fn router() -> Router {
    Router::new()
        .merge(guest::router())
        .merge(dashboard::router())
        .merge(transfers::router())
        .merge(account::router())
        .merge(admin::router())
}
