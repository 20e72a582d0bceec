//! Modelo de RouteOptimization
//!
//! Registro de una ruta ya optimizada: el servicio almacena el resultado y
//! sintetiza métricas placeholder, no planifica rutas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::Document;

/// Estado del registro de ruta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Pending,
    Active,
    Completed,
}

impl RouteStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RouteStatus::Pending),
            "active" => Some(RouteStatus::Active),
            "completed" => Some(RouteStatus::Completed),
            _ => None,
        }
    }
}

/// Parada del camino optimizado; los sequenceNumber son 1-based contiguos
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub sequence_number: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptimization {
    pub id: Option<String>,
    pub route_id: String,
    pub vehicle_id: Option<String>,
    pub driver_id: Option<String>,
    pub optimized_path: Vec<Location>,
    pub estimated_distance: f64,
    pub estimated_duration: f64,
    pub fuel_efficiency: f64,
    pub load_capacity: f64,
    pub current_load: f64,
    pub cost_savings: f64,
    pub optimization_algorithm: Option<String>,
    pub calculated_at: DateTime<Utc>,
    pub status: RouteStatus,
}

impl Document for RouteOptimization {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// Parada tal como llega en el request; la secuencia se normaliza al escribir
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub address: String,

    pub sequence_number: Option<i32>,
}

/// Request de creación/actualización de un registro de ruta
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptimizationRequest {
    #[validate(length(min = 1))]
    pub route_id: String,

    pub vehicle_id: Option<String>,

    pub driver_id: Option<String>,

    #[validate]
    #[serde(default)]
    pub optimized_path: Vec<LocationInput>,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub load_capacity: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub current_load: f64,

    pub optimization_algorithm: Option<String>,

    pub status: Option<RouteStatus>,
}

/// Estadísticas agregadas de optimización de rutas
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationStatistics {
    pub total_routes: usize,
    pub active_routes: usize,
    pub completed_routes: usize,
    pub average_fuel_efficiency: f64,
    pub total_cost_savings: f64,
    pub average_load_utilization: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_literals() {
        assert_eq!(serde_json::to_value(RouteStatus::Active).unwrap(), "active");
        assert_eq!(RouteStatus::from_str("completed"), Some(RouteStatus::Completed));
        assert_eq!(RouteStatus::from_str("archived"), None);
    }
}
