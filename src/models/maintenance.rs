//! Modelo de VehicleMaintenance
//!
//! Estado de mantenimiento por vehículo: score de salud, clasificaciones
//! canónicas, alertas y salud por componente. Las bandas de clasificación
//! viven aquí, junto a los enums que representan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::Document;

/// Estado de salud derivado del health score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl HealthStatus {
    /// Clasificación canónica del health score
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 80 => HealthStatus::Excellent,
            s if s >= 60 => HealthStatus::Good,
            s if s >= 40 => HealthStatus::Fair,
            s if s >= 20 => HealthStatus::Poor,
            _ => HealthStatus::Critical,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Excellent" => Some(HealthStatus::Excellent),
            "Good" => Some(HealthStatus::Good),
            "Fair" => Some(HealthStatus::Fair),
            "Poor" => Some(HealthStatus::Poor),
            "Critical" => Some(HealthStatus::Critical),
            _ => None,
        }
    }
}

/// Nivel de riesgo derivado del health score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Clasificación canónica del health score
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 70 => RiskLevel::Low,
            s if s >= 50 => RiskLevel::Medium,
            s if s >= 30 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(RiskLevel::Low),
            "Medium" => Some(RiskLevel::Medium),
            "High" => Some(RiskLevel::High),
            "Critical" => Some(RiskLevel::Critical),
            _ => None,
        }
    }
}

/// Estado de un componente derivado de su porcentaje de salud
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ComponentStatus {
    Good,
    Fair,
    Poor,
    Critical,
}

impl ComponentStatus {
    /// Mismas bandas que el health status, sin "Excellent"
    pub fn from_percentage(percentage: i32) -> Self {
        match percentage {
            p if p >= 80 => ComponentStatus::Good,
            p if p >= 60 => ComponentStatus::Fair,
            p if p >= 40 => ComponentStatus::Poor,
            _ => ComponentStatus::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Warning,
    Critical,
    Info,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Alerta de mantenimiento anidada en el registro del vehículo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAlert {
    pub alert_type: AlertType,
    pub component: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub detected_at: DateTime<Utc>,
    pub acknowledged: bool,
}

impl MaintenanceAlert {
    pub fn new(
        alert_type: AlertType,
        component: String,
        message: String,
        severity: AlertSeverity,
    ) -> Self {
        Self {
            alert_type,
            component,
            message,
            severity,
            detected_at: Utc::now(),
            acknowledged: false,
        }
    }
}

/// Salud por componente, con vida útil proyectada en días
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub component_name: String,
    pub health_percentage: i32,
    pub status: ComponentStatus,
    pub remaining_lifespan: i64,
    pub recommendation: String,
}

impl ComponentHealth {
    /// Deriva estado, vida útil y recomendación del porcentaje de salud
    pub fn from_percentage(component_name: String, health_percentage: i32) -> Self {
        let recommendation = if health_percentage < 60 {
            "Schedule maintenance soon"
        } else {
            "Normal operation"
        };

        Self {
            component_name,
            status: ComponentStatus::from_percentage(health_percentage),
            remaining_lifespan: (health_percentage as f64 * 3.65).round() as i64,
            recommendation: recommendation.to_string(),
            health_percentage,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleMaintenance {
    pub id: Option<String>,
    pub vehicle_id: String,
    pub vehicle_number: Option<String>,
    pub health_score: i32,
    pub health_status: HealthStatus,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_scheduled_maintenance: Option<DateTime<Utc>>,
    pub days_since_last_maintenance: Option<i64>,
    pub days_until_next_maintenance: Option<i64>,
    pub total_mileage: f64,
    pub mileage_since_last_service: f64,
    pub alerts: Vec<MaintenanceAlert>,
    pub component_health: Vec<ComponentHealth>,
    pub risk_level: RiskLevel,
    pub estimated_maintenance_cost: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for VehicleMaintenance {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// Alerta en el request de upsert; `detectedAt` y `acknowledged` se
/// completan al construir
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAlertInput {
    pub alert_type: AlertType,
    pub component: String,
    pub message: String,
    pub severity: AlertSeverity,
}

/// Componente en el request de upsert; el resto de campos se deriva del
/// porcentaje
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealthInput {
    #[validate(length(min = 1))]
    pub component_name: String,

    #[validate(range(min = 0, max = 100))]
    pub health_percentage: i32,
}

/// Upsert de mantenimiento, con clave `vehicleId`. Todos los demás campos
/// son opcionales: un campo presente siempre gana en el merge, incluido un
/// cero explícito.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceUpsert {
    #[validate(length(min = 1))]
    pub vehicle_id: String,

    pub vehicle_number: Option<String>,

    #[validate(range(min = 0, max = 100))]
    pub health_score: Option<i32>,

    pub health_status: Option<HealthStatus>,

    pub last_maintenance_date: Option<DateTime<Utc>>,

    pub next_scheduled_maintenance: Option<DateTime<Utc>>,

    #[validate(range(min = 0.0))]
    pub total_mileage: Option<f64>,

    #[validate(range(min = 0.0))]
    pub mileage_since_last_service: Option<f64>,

    pub alerts: Option<Vec<MaintenanceAlertInput>>,

    #[validate]
    pub component_health: Option<Vec<ComponentHealthInput>>,

    pub risk_level: Option<RiskLevel>,

    #[validate(range(min = 0.0))]
    pub estimated_maintenance_cost: Option<f64>,
}

/// Estadísticas agregadas de mantenimiento de toda la flota
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStatistics {
    pub total_vehicles: usize,
    pub excellent_health: usize,
    pub good_health: usize,
    pub fair_health: usize,
    pub poor_health: usize,
    pub critical_health: usize,
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    pub critical_risk: usize,
    pub average_health_score: i64,
    pub total_estimated_cost: f64,
    pub urgent_maintenance_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_bands() {
        assert_eq!(HealthStatus::from_score(100), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(80), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(79), HealthStatus::Good);
        assert_eq!(HealthStatus::from_score(60), HealthStatus::Good);
        assert_eq!(HealthStatus::from_score(59), HealthStatus::Fair);
        assert_eq!(HealthStatus::from_score(40), HealthStatus::Fair);
        assert_eq!(HealthStatus::from_score(39), HealthStatus::Poor);
        assert_eq!(HealthStatus::from_score(20), HealthStatus::Poor);
        assert_eq!(HealthStatus::from_score(19), HealthStatus::Critical);
        assert_eq!(HealthStatus::from_score(0), HealthStatus::Critical);
    }

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_score(70), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(50), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(49), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Critical);
    }

    #[test]
    fn test_component_health_derivation() {
        let healthy = ComponentHealth::from_percentage("Engine".to_string(), 85);
        assert_eq!(healthy.status, ComponentStatus::Good);
        assert_eq!(healthy.remaining_lifespan, 310); // round(85 * 3.65)
        assert_eq!(healthy.recommendation, "Normal operation");

        let worn = ComponentHealth::from_percentage("Brakes".to_string(), 45);
        assert_eq!(worn.status, ComponentStatus::Poor);
        assert_eq!(worn.remaining_lifespan, 164); // round(45 * 3.65)
        assert_eq!(worn.recommendation, "Schedule maintenance soon");
    }

    #[test]
    fn test_enum_wire_literals() {
        assert_eq!(
            serde_json::to_value(HealthStatus::Excellent).unwrap(),
            "Excellent"
        );
        assert_eq!(serde_json::to_value(RiskLevel::Low).unwrap(), "Low");
        assert_eq!(serde_json::to_value(AlertType::Warning).unwrap(), "warning");
        assert_eq!(serde_json::to_value(AlertSeverity::High).unwrap(), "high");
    }
}
