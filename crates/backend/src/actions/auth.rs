//! Login, registration, logout and profile actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mfs_core::{PhoneNumber, Pin, ValidationError, required_text};

use crate::{ActionResult, BackendClient};

/// Login form as submitted by the guest entry page.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub phone: String,
    pub pin: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest {
    phone: PhoneNumber,
    pin: Pin,
}

/// Session credential handed out by the backend at login.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedSession {
    pub access_token: String,
}

impl core::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IssuedSession").finish_non_exhaustive()
    }
}

/// Account kinds a guest may self-register as. Admins are provisioned by the
/// backend only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    Consumer,
    Agent,
    Business,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub phone: String,
    pub pin: String,
    pub kind: AccountKind,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegisterRequest {
    name: String,
    phone: PhoneNumber,
    pin: Pin,
    role: AccountKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

/// Partial profile update; at least one field must be set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ValidationError::invalid("email", "must look like name@example.com")),
    }
}

impl ProfileForm {
    fn validated(&self) -> Result<ProfileForm, ValidationError> {
        let name = self.name.as_deref().map(|n| required_text("name", n)).transpose()?;
        let email = self.email.as_deref().map(validate_email).transpose()?;
        if name.is_none() && email.is_none() {
            return Err(ValidationError::Missing("name or email"));
        }
        Ok(ProfileForm { name, email })
    }
}

pub async fn login(client: &BackendClient, form: &LoginForm) -> ActionResult<IssuedSession> {
    let body = LoginRequest {
        phone: PhoneNumber::parse(&form.phone)?,
        pin: Pin::parse(&form.pin)?,
    };
    Ok(client.post("/auth/login", None, &body).await?)
}

pub async fn register(client: &BackendClient, form: &RegisterForm) -> ActionResult<Value> {
    let body = RegisterRequest {
        name: required_text("name", &form.name)?,
        phone: PhoneNumber::parse(&form.phone)?,
        pin: Pin::parse(&form.pin)?,
        role: form.kind,
        email: form.email.as_deref().map(validate_email).transpose()?,
    };
    Ok(client.post("/auth/register", None, &body).await?)
}

/// Tell the backend the session is over. Callers clear the local credential
/// regardless of the outcome.
pub async fn logout(client: &BackendClient, token: &str) -> ActionResult<()> {
    Ok(client.post("/auth/logout", Some(token), &serde_json::json!({})).await?)
}

pub async fn me(client: &BackendClient, token: &str) -> ActionResult<Value> {
    Ok(client.get("/users/me", Some(token)).await?)
}

pub async fn update_profile(client: &BackendClient, token: &str, form: &ProfileForm) -> ActionResult<Value> {
    let body = form.validated()?;
    Ok(client.patch("/users/me", Some(token), Some(&body)).await?)
}
