//! Modelo de Telemetry
//!
//! Lecturas de posición y velocidad por vehículo. Los ids de vehículo y
//! conductor son claves de búsqueda; no se valida integridad referencial.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    pub id: Option<String>,
    pub vehicle_id: String,
    pub driver_id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub recorded_at: DateTime<Utc>,
}

impl Document for Telemetry {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// Request de ingesta de telemetría; `recordedAt` por defecto es ahora
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTelemetryRequest {
    #[validate(length(min = 1))]
    pub vehicle_id: String,

    pub driver_id: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = 0.0))]
    pub speed: f64,

    pub recorded_at: Option<DateTime<Utc>>,
}
