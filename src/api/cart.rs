use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::ApiError;
use crate::infrastructure::AppState;
use crate::infrastructure::auth::Claims;
use crate::services::cart_service;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub book_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    /// Zero or less removes the line
    pub quantity: i32,
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "The caller's cart"),
        (status = 401, description = "Not logged in")
    ),
    security(("bearer_auth" = []))
)]
pub async fn view_cart(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse, ApiError> {
    let cart = cart_service::view(state.cart_repo.as_ref(), claims.customer_id()?).await?;
    Ok(Json(json!({ "success": true, "cart": cart })))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Item added"),
        (status = 400, description = "Out of stock or quantity too large"),
        (status = 404, description = "No such book")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_item(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<AddItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = claims.customer_id()?;

    let cart = cart_service::add_item(
        state.cart_repo.as_ref(),
        state.book_repo.as_ref(),
        customer_id,
        payload.book_id,
        payload.quantity,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Added to cart",
        "cart": cart
    })))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{id}",
    params(("id" = i32, Path, description = "Cart item id")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Cart updated"),
        (status = 400, description = "Quantity exceeds stock"),
        (status = 403, description = "Item belongs to another cart"),
        (status = 404, description = "No such item")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_item(
    State(state): State<AppState>,
    claims: Claims,
    Path(item_id): Path<i32>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = claims.customer_id()?;

    let cart = cart_service::update_item(
        state.cart_repo.as_ref(),
        state.book_repo.as_ref(),
        customer_id,
        item_id,
        payload.quantity,
    )
    .await?;

    let message = if payload.quantity <= 0 {
        "Item removed from cart"
    } else {
        "Cart updated"
    };

    Ok(Json(json!({ "success": true, "message": message, "cart": cart })))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(("id" = i32, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Item removed"),
        (status = 403, description = "Item belongs to another cart"),
        (status = 404, description = "No such item")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_item(
    State(state): State<AppState>,
    claims: Claims,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let cart =
        cart_service::remove_item(state.cart_repo.as_ref(), claims.customer_id()?, item_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Item removed from cart",
        "cart": cart
    })))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses((status = 200, description = "Cart emptied")),
    security(("bearer_auth" = []))
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse, ApiError> {
    let cart = cart_service::clear(state.cart_repo.as_ref(), claims.customer_id()?).await?;
    Ok(Json(json!({ "success": true, "message": "Cart cleared", "cart": cart })))
}
