//! Recommendation Service - "more from authors you bought", else best rated

use sea_orm::*;
use std::collections::{HashMap, HashSet};

use crate::domain::{DomainError, average_score};
use crate::models::Book;
use crate::models::book::{self, Entity as BookEntity};
use crate::models::order::{self, Entity as OrderEntity};
use crate::models::order_item::{self, Entity as OrderItemEntity};
use crate::models::rating::Entity as RatingEntity;

pub const DEFAULT_LIMIT: u64 = 5;
pub const MAX_LIMIT: u64 = 20;

pub fn clamp_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

pub async fn recommend(
    db: &DatabaseConnection,
    customer_id: i32,
    limit: u64,
) -> Result<Vec<Book>, DomainError> {
    let order_ids: Vec<i32> = OrderEntity::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .all(db)
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();

    let purchased: HashSet<i32> = if order_ids.is_empty() {
        HashSet::new()
    } else {
        OrderItemEntity::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|item| item.book_id)
            .collect()
    };

    if !purchased.is_empty() {
        let authors: Vec<String> = BookEntity::find()
            .filter(book::Column::Id.is_in(purchased.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(|b| b.author)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let same_authors = BookEntity::find()
            .filter(book::Column::Author.is_in(authors))
            .filter(book::Column::Id.is_not_in(purchased.iter().copied()))
            .filter(book::Column::Stock.gt(0))
            .order_by_desc(book::Column::Stock)
            .order_by_asc(book::Column::Id)
            .limit(limit)
            .all(db)
            .await?;

        if !same_authors.is_empty() {
            tracing::debug!(
                "Recommending {} books by known authors to customer {}",
                same_authors.len(),
                customer_id
            );
            return Ok(same_authors.into_iter().map(Book::from).collect());
        }
    }

    top_rated(db, limit).await
}

/// Books ordered by average score (desc), then id. Unrated books are not included.
pub async fn top_rated(db: &DatabaseConnection, limit: u64) -> Result<Vec<Book>, DomainError> {
    let mut scores: HashMap<i32, (i64, u64)> = HashMap::new();
    for rating in RatingEntity::find().all(db).await? {
        let entry = scores.entry(rating.book_id).or_insert((0, 0));
        entry.0 += i64::from(rating.score);
        entry.1 += 1;
    }

    let mut ranked: Vec<(i32, f64, u64)> = scores
        .into_iter()
        .filter_map(|(book_id, (sum, count))| {
            Some((book_id, average_score(sum, count)?, count))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(limit as usize);

    if ranked.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = ranked.iter().map(|(id, _, _)| *id).collect();
    let mut models: HashMap<i32, book::Model> = BookEntity::find()
        .filter(book::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    Ok(ranked
        .into_iter()
        .filter_map(|(id, avg, count)| {
            let mut book = Book::from(models.remove(&id)?);
            book.average_rating = Some(avg);
            book.rating_count = Some(count);
            Some(book)
        })
        .collect())
}
