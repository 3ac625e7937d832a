//! Session-scoped server-side cart.
//!
//! The storefront UI keeps its cart locally (`client::cart`); these endpoints
//! back the repository's cart contract for clients that want it persisted.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::cart_routes())
}
