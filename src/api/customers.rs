use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::ApiError;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::infrastructure::auth::Claims;
use crate::services::account_service::{self, Registration};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/api/customers/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Customer created"),
        (status = 400, description = "Invalid form"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = account_service::register(
        state.customer_repo.as_ref(),
        Registration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            confirm_password: payload.confirm_password,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Registration successful",
            "customer": customer
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/customers/login",
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
    let session = account_service::login(
        state.customer_repo.as_ref(),
        &state.jwt,
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Welcome back, {}", session.customer.name),
        "token": session.token,
        "customer": session.customer
    })))
}

#[utoipa::path(
    get,
    path = "/api/customers/me",
    responses(
        (status = 200, description = "Current customer"),
        (status = 401, description = "Not logged in")
    ),
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse, ApiError> {
    let id = claims.customer_id()?;
    let customer = state
        .customer_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Customer"))?;

    Ok(Json(json!({ "success": true, "customer": customer })))
}

#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "All customers"),
        (status = 403, description = "Staff only")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customers(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse, ApiError> {
    claims.require_staff()?;
    let customers = state.customer_repo.find_all().await?;

    Ok(Json(json!({
        "success": true,
        "total": customers.len(),
        "customers": customers
    })))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer"),
        (status = 403, description = "Another customer's profile"),
        (status = 404, description = "No such customer")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_customer(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if !claims.is_staff() && claims.customer_id()? != id {
        return Err(DomainError::Forbidden(
            "You can only view your own profile".to_string(),
        )
        .into());
    }

    let customer = state
        .customer_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Customer"))?;

    Ok(Json(json!({ "success": true, "customer": customer })))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}/exists",
    params(("id" = i32, Path, description = "Customer id")),
    responses((status = 200, description = "Whether the customer exists"))
)]
pub async fn customer_exists(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let exists = state.customer_repo.find_by_id(id).await?.is_some();
    Ok(Json(json!({ "success": true, "exists": exists })))
}
