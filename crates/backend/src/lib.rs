//! Client for the remote MFS backend plus the thin data actions the gateway
//! exposes on top of it.

pub mod actions;
mod client;
mod error;
mod response;

pub use actions::PageQuery;
pub use client::BackendClient;
pub use error::{ActionError, ActionResult, BackendError};
pub use response::ActionResponse;
