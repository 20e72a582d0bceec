//! API endpoints
//!
//! Este módulo contiene los endpoints HTTP de la API.

pub mod auth;
pub mod drivers;
pub mod maintenance;
pub mod route_optimization;
pub mod telemetry;

use axum::Router;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::create_auth_router())
        .nest("/api/drivers", drivers::create_driver_router())
        .nest("/api/maintenance", maintenance::create_maintenance_router())
        .nest(
            "/api/route-optimization",
            route_optimization::create_route_optimization_router(),
        )
        .nest("/api/telemetry", telemetry::create_telemetry_router())
}
