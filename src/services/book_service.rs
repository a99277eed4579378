//! Book Service - catalog rules that sit above the repositories
//!
//! Validation for staff catalog edits, stock adjustments and customer ratings.

use serde::Serialize;

use crate::domain::{BookRepository, DomainError, NewBook, Rating, RatingRepository};
use crate::models::Book;

/// Stock view of a single book
#[derive(Debug, Clone, Serialize)]
pub struct StockInfo {
    pub book_id: i32,
    pub title: String,
    pub price: f64,
    pub stock: i32,
    pub available: bool,
}

impl From<Book> for StockInfo {
    fn from(book: Book) -> Self {
        Self {
            book_id: book.id,
            title: book.title,
            price: book.price,
            stock: book.stock,
            available: book.available,
        }
    }
}

/// Trim and check a staff-submitted book
pub fn validate_new_book(book: NewBook) -> Result<NewBook, DomainError> {
    let title = book.title.trim().to_string();
    let author = book.author.trim().to_string();

    if title.is_empty() {
        return Err(DomainError::validation("Title is required"));
    }
    if author.is_empty() {
        return Err(DomainError::validation("Author is required"));
    }
    if !book.price.is_finite() || book.price < 0.0 {
        return Err(DomainError::validation("Price cannot be negative"));
    }
    if book.stock < 0 {
        return Err(DomainError::validation("Stock cannot be negative"));
    }

    Ok(NewBook {
        title,
        author,
        ..book
    })
}

pub async fn create_book(books: &dyn BookRepository, book: NewBook) -> Result<Book, DomainError> {
    let book = books.create(validate_new_book(book)?).await?;
    tracing::info!("📚 Book {} added to catalog: {}", book.id, book.title);
    Ok(book)
}

pub async fn stock_info(books: &dyn BookRepository, id: i32) -> Result<StockInfo, DomainError> {
    books
        .find_by_id(id)
        .await?
        .map(StockInfo::from)
        .ok_or_else(|| DomainError::not_found("Book"))
}

pub async fn adjust_stock(
    books: &dyn BookRepository,
    id: i32,
    quantity_change: i32,
) -> Result<StockInfo, DomainError> {
    let book = books.adjust_stock(id, quantity_change).await?;
    tracing::info!(
        "Stock of book {} changed by {} (now {})",
        book.id,
        quantity_change,
        book.stock
    );
    Ok(StockInfo::from(book))
}

pub fn validate_score(score: i32) -> Result<i32, DomainError> {
    if (1..=5).contains(&score) {
        Ok(score)
    } else {
        Err(DomainError::validation("Score must be between 1 and 5"))
    }
}

/// Record a customer's score; rating again replaces the previous score
pub async fn rate_book(
    books: &dyn BookRepository,
    ratings: &dyn RatingRepository,
    customer_id: i32,
    book_id: i32,
    score: i32,
) -> Result<(Rating, Option<f64>, u64), DomainError> {
    let score = validate_score(score)?;

    if books.find_by_id(book_id).await?.is_none() {
        return Err(DomainError::not_found("Book"));
    }

    let rating = ratings.upsert(customer_id, book_id, score).await?;
    let (average, count) = ratings.stats(book_id).await?;
    Ok((rating, average, count))
}
