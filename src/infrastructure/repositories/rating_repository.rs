//! SeaORM implementation of RatingRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};

use crate::domain::{DomainError, Rating, RatingRepository, average_score};
use crate::models::rating::{ActiveModel, Column, Entity as RatingEntity};

pub struct SeaOrmRatingRepository {
    db: DatabaseConnection,
}

impl SeaOrmRatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Average score and number of ratings for one book
pub(crate) async fn rating_stats<C: ConnectionTrait>(
    db: &C,
    book_id: i32,
) -> Result<(Option<f64>, u64), DomainError> {
    let ratings = RatingEntity::find()
        .filter(Column::BookId.eq(book_id))
        .all(db)
        .await?;

    let count = ratings.len() as u64;
    let sum: i64 = ratings.iter().map(|r| i64::from(r.score)).sum();
    Ok((average_score(sum, count), count))
}

#[async_trait]
impl RatingRepository for SeaOrmRatingRepository {
    async fn upsert(
        &self,
        customer_id: i32,
        book_id: i32,
        score: i32,
    ) -> Result<Rating, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let existing = RatingEntity::find()
            .filter(Column::CustomerId.eq(customer_id))
            .filter(Column::BookId.eq(book_id))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(rating) => {
                let mut active: ActiveModel = rating.into();
                active.score = Set(score);
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                ActiveModel {
                    customer_id: Set(customer_id),
                    book_id: Set(book_id),
                    score: Set(score),
                    created_at: Set(now.clone()),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?
            }
        };

        Ok(Rating {
            customer_id: model.customer_id,
            book_id: model.book_id,
            score: model.score,
        })
    }

    async fn stats(&self, book_id: i32) -> Result<(Option<f64>, u64), DomainError> {
        rating_stats(&self.db, book_id).await
    }
}
