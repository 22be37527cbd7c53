//! Admin-only consumer management.

use serde_json::Value;

use mfs_core::ResourceId;

use super::PageQuery;
use crate::{ActionResult, BackendClient};

pub async fn list(client: &BackendClient, token: &str, query: &PageQuery) -> ActionResult<Value> {
    Ok(client.get_with_query("/consumers", Some(token), &query.to_pairs()).await?)
}

pub async fn get(client: &BackendClient, token: &str, id: &str) -> ActionResult<Value> {
    let id = ResourceId::parse(id)?;
    Ok(client.get(&format!("/consumers/{id}"), Some(token)).await?)
}

/// Block (`true`) or unblock (`false`) a consumer account.
pub async fn set_blocked(client: &BackendClient, token: &str, id: &str, blocked: bool) -> ActionResult<Value> {
    let id = ResourceId::parse(id)?;
    let action = if blocked { "block" } else { "unblock" };
    Ok(client
        .patch(&format!("/consumers/{id}/{action}"), Some(token), None::<&()>)
        .await?)
}
