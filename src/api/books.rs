use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use super::ApiError;
use crate::domain::{BookFilter, DomainError, NewBook};
use crate::infrastructure::AppState;
use crate::infrastructure::auth::Claims;
use crate::services::{book_service, recommendation_service};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive match on title or author
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockChangeRequest {
    /// Positive to restock, negative to remove
    pub quantity_change: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RatingRequest {
    pub score: i32,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecommendationQuery {
    pub limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/books",
    params(BookQuery),
    responses((status = 200, description = "Books in the catalog"))
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let books = state
        .book_repo
        .find_all(BookFilter {
            search: query.search,
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "total": books.len(),
        "books": books
    })))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Invalid book"),
        (status = 403, description = "Staff only")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_book(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateBookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    claims.require_staff()?;

    let book = book_service::create_book(
        state.book_repo.as_ref(),
        NewBook {
            title: payload.title,
            author: payload.author,
            price: payload.price,
            stock: payload.stock,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Book created successfully",
            "book": book
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book with rating summary", body = Book),
        (status = 404, description = "No such book")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state
        .book_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Book"))?;

    Ok(Json(json!({ "success": true, "book": book })))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}/stock",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Current stock"),
        (status = 404, description = "No such book")
    )
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let info = book_service::stock_info(state.book_repo.as_ref(), id).await?;
    Ok(Json(json!({ "success": true, "stock": info })))
}

#[utoipa::path(
    post,
    path = "/api/books/{id}/stock",
    params(("id" = i32, Path, description = "Book id")),
    request_body = StockChangeRequest,
    responses(
        (status = 200, description = "Stock adjusted"),
        (status = 400, description = "Stock would become negative"),
        (status = 403, description = "Staff only"),
        (status = 404, description = "No such book")
    ),
    security(("bearer_auth" = []))
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<StockChangeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    claims.require_staff()?;

    let info =
        book_service::adjust_stock(state.book_repo.as_ref(), id, payload.quantity_change).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Stock updated to {}", info.stock),
        "stock": info
    })))
}

#[utoipa::path(
    post,
    path = "/api/books/{id}/ratings",
    params(("id" = i32, Path, description = "Book id")),
    request_body = RatingRequest,
    responses(
        (status = 200, description = "Rating saved"),
        (status = 400, description = "Score out of range"),
        (status = 404, description = "No such book")
    ),
    security(("bearer_auth" = []))
)]
pub async fn rate_book(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<RatingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = claims.customer_id()?;

    let (rating, average_rating, rating_count) = book_service::rate_book(
        state.book_repo.as_ref(),
        state.rating_repo.as_ref(),
        customer_id,
        id,
        payload.score,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Thanks for rating this book",
        "rating": rating,
        "average_rating": average_rating,
        "rating_count": rating_count
    })))
}

#[utoipa::path(
    get,
    path = "/api/books/recommendations",
    params(RecommendationQuery),
    responses(
        (status = 200, description = "Recommended books"),
        (status = 401, description = "Not logged in")
    ),
    security(("bearer_auth" = []))
)]
pub async fn recommendations(
    State(state): State<AppState>,
    claims: Claims,
    Query(query): Query<RecommendationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = claims.customer_id()?;
    let limit = recommendation_service::clamp_limit(query.limit);

    let books = recommendation_service::recommend(state.db(), customer_id, limit).await?;

    Ok(Json(json!({ "success": true, "books": books })))
}
