//! Endpoints de autenticación
//!
//! A diferencia del resto de la API, estas respuestas siempre llevan el
//! envelope `{success, message, ...}` con el detalle del error en el
//! body, porque el frontend de login lo muestra tal cual.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::models::user::{ChangePasswordRequest, LoginRequest, SignupRequest, User, UserRole};
use crate::models::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

const MIN_PASSWORD_LENGTH: usize = 8;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/fleet-manager/signup", post(signup_fleet_manager))
        .route("/driver/signup", post(signup_driver))
        .route("/fleet-manager/login", post(login_fleet_manager))
        .route("/driver/login", post(login_driver))
        .route("/change-password", post(change_password))
        .route("/fleet-managers", get(list_fleet_managers))
        .route("/drivers", get(list_drivers))
}

/// Mapea errores de negocio al envelope de auth. A diferencia del resto
/// de la API, "usuario no encontrado" acá es 400 (el email es input).
fn failure(error: AppError) -> (StatusCode, Json<Value>) {
    let (status, message) = match error {
        AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        AppError::Conflict(msg)
        | AppError::BadRequest(msg)
        | AppError::NotFound(msg)
        | AppError::StoreUnavailable(msg) => (StatusCode::BAD_REQUEST, msg),
        AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
        AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
    };
    (status, Json(json!({ "success": false, "message": message })))
}

async fn signup_fleet_manager(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> (StatusCode, Json<Value>) {
    match state.identity.register_fleet_manager(request).await {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Fleet manager registered successfully",
                "user": user.stripped(),
            })),
        ),
        Err(e) => failure(e),
    }
}

async fn signup_driver(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> (StatusCode, Json<Value>) {
    match state.identity.register_driver(request).await {
        Ok((user, driver)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Driver registered successfully",
                "user": user.stripped(),
                "driver": driver,
            })),
        ),
        Err(e) => failure(e),
    }
}

async fn login_fleet_manager(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    login(state, request, UserRole::FleetManager).await
}

async fn login_driver(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    login(state, request, UserRole::Driver).await
}

async fn login(
    state: AppState,
    request: LoginRequest,
    role: UserRole,
) -> (StatusCode, Json<Value>) {
    match state
        .identity
        .authenticate(&request.email, &request.password, role)
        .await
    {
        Ok((user, token)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Login successful",
                "user": user,
                "token": token,
            })),
        ),
        Err(e) => failure(e),
    }
}

async fn change_password(
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> (StatusCode, Json<Value>) {
    let email = request.email.unwrap_or_default();
    let current = request.current_password.unwrap_or_default();
    let new = request.new_password.unwrap_or_default();

    if email.is_empty() || current.is_empty() || new.is_empty() {
        return failure(AppError::BadRequest(
            "Email, current password, and new password are required".to_string(),
        ));
    }
    if new.len() < MIN_PASSWORD_LENGTH {
        return failure(AppError::BadRequest(
            "New password must be at least 8 characters long".to_string(),
        ));
    }

    match state.identity.change_password(&email, &current, &new).await {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Password changed successfully",
            })),
        ),
        Ok(false) => failure(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        )),
        Err(e) => failure(e),
    }
}

async fn list_fleet_managers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let users = state.identity.list_by_role(UserRole::FleetManager).await?;
    Ok(Json(ApiResponse::success(users)))
}

async fn list_drivers(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let users = state.identity.list_by_role(UserRole::Driver).await?;
    Ok(Json(ApiResponse::success(users)))
}
