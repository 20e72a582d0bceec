//! Modelos de dominio
//!
//! Entidades persistidas, DTOs de request y tipos de respuesta. Todos los
//! campos viajan en camelCase: es el contrato con el frontend NeuroFleetX.

pub mod driver;
pub mod maintenance;
pub mod route_optimization;
pub mod telemetry;
pub mod user;

use serde::{Deserialize, Serialize};

/// Response genérica con envoltorio `{success, message, data}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }
}
