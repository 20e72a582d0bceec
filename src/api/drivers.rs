//! Endpoints CRUD de drivers

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use validator::Validate;

use crate::models::driver::{CreateDriverRequest, Driver, UpdateDriverRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers))
        .route("/", post(create_driver))
        .route("/:id", get(get_driver))
        .route("/:id", put(update_driver))
        .route("/:id", delete(delete_driver))
}

async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, AppError> {
    Ok(Json(state.drivers.list().await?))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Driver>, AppError> {
    Ok(Json(state.drivers.get(&id).await?))
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    request.validate()?;
    Ok(Json(state.drivers.create(request).await?))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    request.validate()?;
    Ok(Json(state.drivers.update(&id, request).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.drivers.delete(&id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
