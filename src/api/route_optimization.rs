//! Endpoints de optimización de rutas

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use validator::Validate;

use crate::models::route_optimization::{
    OptimizationStatistics, RouteOptimization, RouteOptimizationRequest, RouteStatus,
};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub fn create_route_optimization_router() -> Router<AppState> {
    let router = Router::new()
        .route("/", get(list_all))
        .route("/", post(create))
        .route("/statistics", get(statistics))
        .route("/route/:route_id", get(list_by_route))
        .route("/vehicle/:vehicle_id", get(list_by_vehicle))
        .route("/driver/:driver_id", get(list_by_driver))
        .route("/status/:status", get(list_by_status))
        .route("/:id", get(get_by_id))
        .route("/:id", put(update))
        .route("/:id", delete(delete_record));

    #[cfg(feature = "mock-data")]
    let router = router.route("/generate-mock/:count", post(generate_mock));

    router
}

async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<RouteOptimization>>, AppError> {
    Ok(Json(state.route_optimization.get_all().await?))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RouteOptimization>, AppError> {
    state
        .route_optimization
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Route optimization", &id))
}

async fn list_by_route(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<Json<Vec<RouteOptimization>>, AppError> {
    Ok(Json(
        state.route_optimization.get_by_route_id(&route_id).await?,
    ))
}

async fn list_by_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<Vec<RouteOptimization>>, AppError> {
    Ok(Json(
        state
            .route_optimization
            .get_by_vehicle_id(&vehicle_id)
            .await?,
    ))
}

async fn list_by_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<String>,
) -> Result<Json<Vec<RouteOptimization>>, AppError> {
    Ok(Json(
        state
            .route_optimization
            .get_by_driver_id(&driver_id)
            .await?,
    ))
}

async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<RouteOptimization>>, AppError> {
    let status = RouteStatus::from_str(&status)
        .ok_or_else(|| bad_request_error(&format!("Invalid route status: {}", status)))?;
    Ok(Json(state.route_optimization.get_by_status(status).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<RouteOptimizationRequest>,
) -> Result<Json<RouteOptimization>, AppError> {
    request.validate()?;
    Ok(Json(state.route_optimization.create(request).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RouteOptimizationRequest>,
) -> Result<Json<RouteOptimization>, AppError> {
    request.validate()?;
    state
        .route_optimization
        .update(&id, request)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Route optimization", &id))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.route_optimization.delete(&id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<OptimizationStatistics>, AppError> {
    Ok(Json(state.route_optimization.statistics().await?))
}

#[cfg(feature = "mock-data")]
async fn generate_mock(
    State(state): State<AppState>,
    Path(count): Path<usize>,
) -> Result<Json<Vec<RouteOptimization>>, AppError> {
    Ok(Json(state.route_optimization.generate_mock(count).await?))
}
