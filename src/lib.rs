//! NeuroFleetX backend
//!
//! Backend de gestión de flota: autenticación, conductores, mantenimiento
//! predictivo, registros de optimización de rutas y telemetría.

pub mod api;
pub mod config;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

use axum::Router;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la aplicación, listo para servir
pub fn create_app(state: AppState) -> Router {
    api::create_api_router()
        .layer(cors_middleware())
        .with_state(state)
}
