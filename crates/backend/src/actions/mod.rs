//! Thin data actions: validate input, call one backend endpoint, return the
//! unwrapped payload. No business logic lives here.

use serde::Deserialize;

pub mod agents;
pub mod analytics;
pub mod auth;
pub mod billers;
pub mod consumers;
pub mod transactions;
pub mod wallet;

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Paging/search parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
}

impl PageQuery {
    /// Query pairs for the backend: page is 1-based, limit clamped to 1..=100,
    /// blank search dropped.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        let mut pairs = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}
