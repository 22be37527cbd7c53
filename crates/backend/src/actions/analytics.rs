use serde_json::Value;

use crate::{ActionResult, BackendClient};

pub async fn overview(client: &BackendClient, token: &str) -> ActionResult<Value> {
    Ok(client.get("/analytics/overview", Some(token)).await?)
}
