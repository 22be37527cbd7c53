//! Admin-only agent management.

use serde_json::Value;

use mfs_core::ResourceId;

use super::PageQuery;
use crate::{ActionResult, BackendClient};

/// Status transitions an admin may apply to an agent account.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AgentTransition {
    Approve,
    Block,
    Unblock,
}

impl AgentTransition {
    fn segment(self) -> &'static str {
        match self {
            AgentTransition::Approve => "approve",
            AgentTransition::Block => "block",
            AgentTransition::Unblock => "unblock",
        }
    }
}

pub async fn list(client: &BackendClient, token: &str, query: &PageQuery) -> ActionResult<Value> {
    Ok(client.get_with_query("/agents", Some(token), &query.to_pairs()).await?)
}

pub async fn get(client: &BackendClient, token: &str, id: &str) -> ActionResult<Value> {
    let id = ResourceId::parse(id)?;
    Ok(client.get(&format!("/agents/{id}"), Some(token)).await?)
}

pub async fn transition(
    client: &BackendClient,
    token: &str,
    id: &str,
    transition: AgentTransition,
) -> ActionResult<Value> {
    let id = ResourceId::parse(id)?;
    let path = format!("/agents/{id}/{}", transition.segment());
    Ok(client.patch(&path, Some(token), None::<&()>).await?)
}
