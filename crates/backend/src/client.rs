//! Typed HTTP client for the remote MFS backend.
//!
//! Every backend response is a JSON envelope `{ success, message?, data? }`.
//! This client unwraps it into `T` or a [`BackendError`]. A 401 on a call that
//! carried a bearer token is [`BackendError::Unauthorized`] so callers can drop
//! the local session; on a token-less call (login, register) it is an ordinary
//! [`BackendError::Api`] failure.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::BackendError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the backend API.
///
/// Cheap to clone (the underlying connection pool is shared).
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// `base_url` must be absolute (`http://host:port/api/v1`); a trailing `/`
    /// is ignored.
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let parsed =
            reqwest::Url::parse(base_url).map_err(|e| BackendError::InvalidBaseUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BackendError::InvalidBaseUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, BackendError> {
        self.send(Method::GET, path, token, None::<&()>, &[]).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        self.send(Method::GET, path, token, None::<&()>, query).await
    }

    pub async fn post<T, B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, token, Some(body), &[]).await
    }

    pub async fn put<T, B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, token, Some(body), &[]).await
    }

    pub async fn patch<T, B>(&self, path: &str, token: Option<&str>, body: Option<&B>) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, token, body, &[]).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T, BackendError> {
        self.send(Method::DELETE, path, token, None::<&()>, &[]).await
    }

    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut req: RequestBuilder = self.http.request(method.clone(), &url);

        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "backend request failed");
            BackendError::Network(e.to_string())
        })?;

        let status = resp.status();
        tracing::debug!(%method, path, status = status.as_u16(), "backend response");

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&bytes, status);
            if status == StatusCode::UNAUTHORIZED && token.is_some() {
                tracing::debug!(%method, path, "backend refused the session credential");
                return Err(BackendError::Unauthorized(message));
            }
            tracing::warn!(%method, path, status = status.as_u16(), %message, "backend returned an error");
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        decode_envelope(&bytes)
    }
}

/// `message` (or `error`) from an error body, else the status reason.
fn error_message(bytes: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

/// Unwrap `{ success, message?, data? }` into `T`. An empty body or missing
/// `data` decodes as JSON `null`, so `T = ()` / `Option<_>` / `Value` work for
/// endpoints that return nothing.
fn decode_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BackendError> {
    let envelope = if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        Envelope {
            success: true,
            message: None,
            data: None,
        }
    } else {
        serde_json::from_slice::<Envelope>(bytes).map_err(|e| BackendError::Decode(e.to_string()))?
    };

    if !envelope.success {
        return Err(BackendError::Rejected(
            envelope.message.unwrap_or_else(|| "request was rejected".to_string()),
        ));
    }

    serde_json::from_value(envelope.data.unwrap_or(serde_json::Value::Null))
        .map_err(|e| BackendError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn base_url_must_be_http() {
        assert!(BackendClient::new("http://localhost:5000/api/v1/").is_ok());
        assert!(matches!(
            BackendClient::new("localhost:5000"),
            Err(BackendError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            BackendClient::new("ftp://example.com"),
            Err(BackendError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let client = BackendClient::new("http://localhost:5000/api/v1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api/v1");
    }

    #[test]
    fn envelope_data_is_unwrapped() {
        let v: Value = decode_envelope(br#"{"success":true,"data":{"balance":120}}"#).unwrap();
        assert_eq!(v["balance"], 120);
    }

    #[test]
    fn envelope_without_data_decodes_unit() {
        let _: () = decode_envelope(br#"{"success":true,"message":"deleted"}"#).unwrap();
        let _: () = decode_envelope(b"").unwrap();
    }

    #[test]
    fn unsuccessful_envelope_is_rejected_with_message() {
        let err = decode_envelope::<Value>(br#"{"success":false,"message":"Insufficient balance"}"#).unwrap_err();
        assert_eq!(err, BackendError::Rejected("Insufficient balance".to_string()));
    }

    #[test]
    fn error_message_prefers_backend_text() {
        assert_eq!(
            error_message(br#"{"success":false,"message":"Invalid PIN"}"#, StatusCode::UNAUTHORIZED),
            "Invalid PIN"
        );
        assert_eq!(error_message(br#"{"error":"nope"}"#, StatusCode::FORBIDDEN), "nope");
        assert_eq!(error_message(b"<html>", StatusCode::BAD_GATEWAY), "Bad Gateway");
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(matches!(
            decode_envelope::<Value>(b"<html>"),
            Err(BackendError::Decode(_))
        ));
    }
}
