pub mod books;
pub mod cart;
pub mod customers;
pub mod health;
pub mod orders;
pub mod staff;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

/// Handler error: a `DomainError` rendered as `{success: false, message}`
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            DomainError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            DomainError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Customers
        .route("/customers", get(customers::list_customers))
        .route("/customers/register", post(customers::register))
        .route("/customers/login", post(customers::login))
        .route("/customers/me", get(customers::me))
        .route("/customers/:id", get(customers::get_customer))
        .route("/customers/:id/exists", get(customers::customer_exists))
        // Staff
        .route("/staff", get(staff::list_staff))
        .route("/staff/login", post(staff::login))
        // Catalog
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/recommendations", get(books::recommendations))
        .route("/books/:id", get(books::get_book))
        .route(
            "/books/:id/stock",
            get(books::get_stock).post(books::adjust_stock),
        )
        .route("/books/:id/ratings", post(books::rate_book))
        // Cart
        .route("/cart", get(cart::view_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/:id",
            put(cart::update_item).delete(cart::remove_item),
        )
        // Checkout & orders
        .route("/shipping-methods", get(orders::list_shipping_methods))
        .route("/payment-methods", get(orders::list_payment_methods))
        .route("/checkout", post(orders::checkout))
        .route("/orders", get(orders::list_orders))
        .route("/orders/:id", get(orders::get_order))
        .with_state(state)
}
