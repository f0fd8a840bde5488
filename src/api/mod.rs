//! HTTP module for the tax map service
//!
//! Serves the two-panel page and the JSON endpoints it renders from.

pub mod handlers;
pub mod service;

pub use service::MapService;
