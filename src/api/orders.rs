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
use crate::services::checkout_service;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub shipping_id: i32,
    pub payment_id: i32,
}

#[utoipa::path(
    get,
    path = "/api/shipping-methods",
    responses((status = 200, description = "Shipping methods and fees"))
)]
pub async fn list_shipping_methods(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let methods = state.option_repo.list_shipping().await?;
    Ok(Json(json!({ "success": true, "shipping_methods": methods })))
}

#[utoipa::path(
    get,
    path = "/api/payment-methods",
    responses((status = 200, description = "Active payment methods"))
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let methods = state.option_repo.list_payments(true).await?;
    Ok(Json(json!({ "success": true, "payment_methods": methods })))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order placed"),
        (status = 400, description = "Empty cart or payment method unavailable"),
        (status = 404, description = "Unknown shipping or payment method"),
        (status = 409, description = "A book ran out of stock")
    ),
    security(("bearer_auth" = []))
)]
pub async fn checkout(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = claims.customer_id()?;

    let order = checkout_service::checkout(
        state.db(),
        customer_id,
        payload.shipping_id,
        payload.payment_id,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": format!("Order #{} placed", order.id),
            "order": order
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses((status = 200, description = "The caller's orders, newest first")),
    security(("bearer_auth" = []))
)]
pub async fn list_orders(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state
        .order_repo
        .find_by_customer(claims.customer_id()?)
        .await?;

    Ok(Json(json!({
        "success": true,
        "total": orders.len(),
        "orders": orders
    })))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with its lines"),
        (status = 404, description = "No such order for this customer")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_order(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = claims.customer_id()?;

    let order = state
        .order_repo
        .find_by_id(id)
        .await?
        .filter(|o| o.customer_id == customer_id)
        .ok_or_else(|| DomainError::not_found("Order"))?;

    Ok(Json(json!({ "success": true, "order": order })))
}
