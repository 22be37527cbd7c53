use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use mfs_auth::{
    CredentialVerifier, Decision, Evidence, IDENTITY_HEADERS, Identity, RedirectTarget, RouteTable, decide,
};

use crate::context::SessionContext;
use crate::session::{self, SessionCookie};

/// Immutable state shared by every request passing through the gate.
#[derive(Clone)]
pub struct GateState {
    pub verifier: Arc<dyn CredentialVerifier>,
    pub routes: Arc<RouteTable>,
    pub cookie: SessionCookie,
}

/// Edge access gate.
///
/// Strips client-supplied identity headers, then reads the session cookie,
/// verifies it, classifies the path and acts on the resulting [`Decision`]:
/// forward (annotated with the verified identity when there is one), redirect,
/// or clear the credential and redirect to the guest entry.
pub async fn access_gate(
    State(state): State<GateState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    for name in IDENTITY_HEADERS {
        req.headers_mut().remove(name);
    }

    let path = req.uri().path().to_string();
    let rule = state.routes.classify(&path);
    let token = session::read_token(req.headers());
    let evidence = Evidence::evaluate(token.as_deref(), state.verifier.as_ref(), Utc::now());

    if let Evidence::InvalidToken(e) = &evidence {
        tracing::warn!(path = %path, reason = e.reason(), "clearing invalid session credential");
    }

    let decision = decide(&evidence, rule);
    match &decision {
        Decision::Allow => next.run(req).await,
        Decision::Forward(identity) => {
            if annotate(&mut req, identity).is_err() {
                tracing::warn!(path = %path, "verified identity is not representable as headers");
                return redirect(&state.cookie, &Decision::ClearSession);
            }
            req.extensions_mut()
                .insert(SessionContext::new(identity.clone(), token.unwrap_or_default()));
            next.run(req).await
        }
        Decision::Redirect { .. } | Decision::ClearSession => {
            tracing::debug!(
                path = %path,
                %rule,
                gate_error = ?decision.gate_error(),
                clears_session = decision.clears_session(),
                "gate redirect"
            );
            redirect(&state.cookie, &decision)
        }
    }
}

fn annotate(req: &mut Request<axum::body::Body>, identity: &Identity) -> Result<(), header::InvalidHeaderValue> {
    for (name, value) in identity.header_pairs() {
        req.headers_mut().insert(name, HeaderValue::from_str(value)?);
    }
    Ok(())
}

/// 303 to the decision's target, removing the stored credential when the
/// decision says so.
fn redirect(cookie: &SessionCookie, decision: &Decision) -> Response {
    let to = decision.redirect_target().unwrap_or(RedirectTarget::GuestEntry);
    let redirect = Redirect::to(to.path());
    if decision.clears_session() {
        ([(header::SET_COOKIE, cookie.clear())], redirect).into_response()
    } else {
        redirect.into_response()
    }
}
