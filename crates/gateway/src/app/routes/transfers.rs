//! Money movement. Which role may use which endpoint is decided by the gate.

use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    response::Response,
    routing::{get, post},
};

use mfs_backend::actions::{
    billers,
    transactions::{self, PayBillForm, TransferForm, TransferKind},
};

use crate::app::extract::JsonBody;
use crate::app::{AppState, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard/send-money", post(send_money))
        .route("/dashboard/cash-out", post(cash_out))
        .route("/dashboard/cash-in", post(cash_in))
        .route("/dashboard/top-up", post(top_up))
        .route("/dashboard/pay-bill", post(pay_bill))
        .route("/dashboard/pay-bill/billers", get(payable_billers))
}

async fn transfer(state: &AppState, session: &SessionContext, kind: TransferKind, form: &TransferForm) -> Response {
    let result = transactions::transfer(&state.backend, session.token(), kind, form).await;
    if result.is_ok() {
        tracing::info!(?kind, subject = %session.subject_id(), "transfer submitted");
    }
    errors::action_reply(&state.cookie, result)
}

pub async fn send_money(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    JsonBody(form): JsonBody<TransferForm>,
) -> Response {
    transfer(&state, &session, TransferKind::SendMoney, &form).await
}

pub async fn cash_out(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    JsonBody(form): JsonBody<TransferForm>,
) -> Response {
    transfer(&state, &session, TransferKind::CashOut, &form).await
}

pub async fn cash_in(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    JsonBody(form): JsonBody<TransferForm>,
) -> Response {
    transfer(&state, &session, TransferKind::CashIn, &form).await
}

pub async fn top_up(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    JsonBody(form): JsonBody<TransferForm>,
) -> Response {
    transfer(&state, &session, TransferKind::TopUp, &form).await
}

pub async fn pay_bill(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
    JsonBody(form): JsonBody<PayBillForm>,
) -> Response {
    let result = transactions::pay_bill(&state.backend, session.token(), &form).await;
    errors::action_reply(&state.cookie, result)
}

pub async fn payable_billers(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    errors::action_reply(&state.cookie, billers::list(&state.backend, session.token()).await)
}
