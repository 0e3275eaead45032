//! # Order Service Library
//!
//! Exposes the Axum router and modules so integration tests can create
//! an in-process server backed by any [`OrderRepository`].

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;

use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use repository::{OrderRepository, SharedRepository};

/// Build the Axum router with all route modules and middleware.
///
/// The caller picks and connects the repository backend.
/// This function does NOT start a server.
pub fn create_app(repository: SharedRepository) -> Router {
    Router::new()
        .merge(routes::orders::router())
        .layer(Extension(repository))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
