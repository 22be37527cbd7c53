//! Request extractors whose rejections use the action error body.
//!
//! Axum's own `Json` / `Form` / `Query` reject malformed input with a
//! plain-text 422. These wrappers turn that into a 400
//! `{ success: false, error }` like any other validation failure.

use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{StatusCode, request::Parts},
    response::Response,
};
use serde::de::DeserializeOwned;

use crate::app::errors;

fn invalid_input(message: String) -> Response {
    errors::json_error(StatusCode::BAD_REQUEST, "invalid_input", message)
}

/// JSON request body.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_input(rejection.body_text())),
        }
    }
}

/// `application/x-www-form-urlencoded` request body.
pub struct FormBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_input(rejection.body_text())),
        }
    }
}

/// Query string parameters.
pub struct QueryParams<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_input(rejection.body_text())),
        }
    }
}
