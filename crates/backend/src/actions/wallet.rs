use serde_json::Value;

use crate::{ActionResult, BackendClient};

/// The caller's own wallet (balance and account state).
pub async fn own(client: &BackendClient, token: &str) -> ActionResult<Value> {
    Ok(client.get("/wallet/me", Some(token)).await?)
}

/// Platform-wide system wallet. Admin only.
pub async fn system(client: &BackendClient, token: &str) -> ActionResult<Value> {
    Ok(client.get("/wallet/system", Some(token)).await?)
}
