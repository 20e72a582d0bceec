//! Endpoints de mantenimiento de vehículos

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use validator::Validate;

use crate::models::maintenance::{
    HealthStatus, MaintenanceStatistics, MaintenanceUpsert, RiskLevel, VehicleMaintenance,
};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub fn create_maintenance_router() -> Router<AppState> {
    let router = Router::new()
        .route("/", get(list_all))
        .route("/", post(upsert))
        .route("/statistics", get(statistics))
        .route("/urgent", get(list_urgent))
        .route("/vehicle/:vehicle_id", get(get_by_vehicle))
        .route("/health-status/:status", get(list_by_health_status))
        .route("/risk-level/:risk", get(list_by_risk_level))
        .route("/:id", put(update))
        .route("/:id", delete(delete_record));

    #[cfg(feature = "mock-data")]
    let router = router.route("/generate-mock/:count", post(generate_mock));

    router
}

async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleMaintenance>>, AppError> {
    Ok(Json(state.maintenance.get_all().await?))
}

async fn get_by_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<VehicleMaintenance>, AppError> {
    state
        .maintenance
        .get_by_vehicle_id(&vehicle_id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Maintenance record", &vehicle_id))
}

async fn list_by_health_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<VehicleMaintenance>>, AppError> {
    let status = HealthStatus::from_str(&status)
        .ok_or_else(|| bad_request_error(&format!("Invalid health status: {}", status)))?;
    Ok(Json(state.maintenance.get_by_health_status(status).await?))
}

async fn list_by_risk_level(
    State(state): State<AppState>,
    Path(risk): Path<String>,
) -> Result<Json<Vec<VehicleMaintenance>>, AppError> {
    let risk = RiskLevel::from_str(&risk)
        .ok_or_else(|| bad_request_error(&format!("Invalid risk level: {}", risk)))?;
    Ok(Json(state.maintenance.get_by_risk_level(risk).await?))
}

async fn list_urgent(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleMaintenance>>, AppError> {
    Ok(Json(state.maintenance.get_urgent().await?))
}

async fn upsert(
    State(state): State<AppState>,
    Json(request): Json<MaintenanceUpsert>,
) -> Result<Json<VehicleMaintenance>, AppError> {
    request.validate()?;
    Ok(Json(state.maintenance.create_or_update(request).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MaintenanceUpsert>,
) -> Result<Json<VehicleMaintenance>, AppError> {
    request.validate()?;
    state
        .maintenance
        .update(&id, request)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Maintenance record", &id))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.maintenance.delete(&id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<MaintenanceStatistics>, AppError> {
    Ok(Json(state.maintenance.statistics().await?))
}

#[cfg(feature = "mock-data")]
async fn generate_mock(
    State(state): State<AppState>,
    Path(count): Path<usize>,
) -> Result<Json<Vec<VehicleMaintenance>>, AppError> {
    Ok(Json(state.maintenance.generate_mock(count).await?))
}
