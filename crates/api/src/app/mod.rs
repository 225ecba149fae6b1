//! HTTP API application wiring (Axum router + service wiring).
//!
//! The folder is structured like:
//! - `services.rs`: infrastructure wiring (stores, cart manager, gateway)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::config::Config;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &Config) -> Router {
    let services = Arc::new(services::build_services(config));
    services::spawn_cart_forwarder(&services);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(Extension(services))
}
