//! Biller catalogue. Admins maintain it; consumers and businesses list it
//! when paying bills.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mfs_core::{ResourceId, ValidationError, required_text};

use crate::{ActionResult, BackendClient};

/// Biller create/update form.
#[derive(Debug, Clone, Deserialize)]
pub struct BillerForm {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
struct BillerRequest {
    name: String,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<String>,
}

impl BillerForm {
    fn validated(&self) -> Result<BillerRequest, ValidationError> {
        let logo = match self.logo.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(url) if url.starts_with("https://") || url.starts_with("http://") => Some(url.to_string()),
            Some(_) => return Err(ValidationError::invalid("logo", "must be an http(s) URL")),
        };
        Ok(BillerRequest {
            name: required_text("name", &self.name)?,
            category: required_text("category", &self.category)?,
            logo,
        })
    }
}

pub async fn list(client: &BackendClient, token: &str) -> ActionResult<Value> {
    Ok(client.get("/billers", Some(token)).await?)
}

pub async fn create(client: &BackendClient, token: &str, form: &BillerForm) -> ActionResult<Value> {
    let body = form.validated()?;
    Ok(client.post("/billers", Some(token), &body).await?)
}

pub async fn update(client: &BackendClient, token: &str, id: &str, form: &BillerForm) -> ActionResult<Value> {
    let id = ResourceId::parse(id)?;
    let body = form.validated()?;
    Ok(client.put(&format!("/billers/{id}"), Some(token), &body).await?)
}

pub async fn delete(client: &BackendClient, token: &str, id: &str) -> ActionResult<()> {
    let id = ResourceId::parse(id)?;
    Ok(client.delete(&format!("/billers/{id}"), Some(token)).await?)
}
