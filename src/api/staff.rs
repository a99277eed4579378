use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use super::ApiError;
use super::customers::LoginRequest;
use crate::infrastructure::AppState;
use crate::infrastructure::auth::Claims;
use crate::services::account_service;

#[utoipa::path(
    post,
    path = "/api/staff/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token issued"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = account_service::staff_login(
        state.staff_repo.as_ref(),
        &state.jwt,
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Logged in as {}", session.staff.name),
        "token": session.token,
        "staff": session.staff
    })))
}

#[utoipa::path(
    get,
    path = "/api/staff",
    responses(
        (status = 200, description = "Staff accounts"),
        (status = 403, description = "Staff only")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_staff(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse, ApiError> {
    claims.require_staff()?;
    let staff = state.staff_repo.find_all().await?;
    Ok(Json(json!({ "success": true, "staff": staff })))
}
