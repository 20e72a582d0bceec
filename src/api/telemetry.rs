//! Endpoints de ingesta y consulta de telemetría

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use validator::Validate;

use crate::models::telemetry::{CreateTelemetryRequest, Telemetry};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_telemetry_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all))
        .route("/", post(ingest))
        .route("/vehicle/:vehicle_id", get(list_by_vehicle))
}

async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Telemetry>>, AppError> {
    Ok(Json(state.telemetry.find_all().await?))
}

async fn list_by_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<Vec<Telemetry>>, AppError> {
    Ok(Json(state.telemetry.find_by_vehicle_id(&vehicle_id).await?))
}

async fn ingest(
    State(state): State<AppState>,
    Json(request): Json<CreateTelemetryRequest>,
) -> Result<Json<Telemetry>, AppError> {
    request.validate()?;
    let reading = Telemetry {
        id: None,
        vehicle_id: request.vehicle_id,
        driver_id: request.driver_id,
        latitude: request.latitude,
        longitude: request.longitude,
        speed: request.speed,
        recorded_at: request.recorded_at.unwrap_or_else(Utc::now),
    };
    Ok(Json(state.telemetry.save(reading).await?))
}
