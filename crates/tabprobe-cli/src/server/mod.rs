//! HTTP API over the quality engine.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
