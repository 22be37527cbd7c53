//! MFS gateway: the edge access gate plus the dashboard routes behind it.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
pub mod session;
