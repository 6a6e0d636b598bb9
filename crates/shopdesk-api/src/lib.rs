//! Shopdesk API Library
//!
//! This crate provides the dashboard pages, the product endpoint, and
//! application setup.

pub mod auth;
pub mod constants;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;
mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
