//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::rating_repository::rating_stats;
use crate::domain::{BookFilter, BookRepository, DomainError, NewBook};
use crate::models::Book;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<Book>, DomainError> {
        let mut query = BookEntity::find();

        let search = filter.search.as_deref().map(str::trim).unwrap_or_default();
        if !search.is_empty() {
            let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
            let cond = Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(Column::Title)))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(Column::Author)))
                        .like(LikeExpr::new(pattern).escape('\\')),
                );
            query = query.filter(cond);
        }

        let books = query.order_by_asc(Column::Id).all(&self.db).await?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let Some(model) = BookEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let (average, count) = rating_stats(&self.db, id).await?;

        let mut book = Book::from(model);
        book.rating_count = Some(count);
        book.average_rating = average;
        Ok(Some(book))
    }

    async fn create(&self, book: NewBook) -> Result<Book, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_book = ActiveModel {
            title: Set(book.title),
            author: Set(book.author),
            price: Set(book.price),
            stock: Set(book.stock),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_book.insert(&self.db).await?;
        Ok(Book::from(result))
    }

    async fn adjust_stock(&self, id: i32, delta: i32) -> Result<Book, DomainError> {
        let mut update = BookEntity::update_many()
            .col_expr(Column::Stock, Expr::col(Column::Stock).add(delta))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(Column::Id.eq(id));

        // The new stock must stay within 0..=i32::MAX
        update = if delta < 0 {
            update.filter(Column::Stock.gte(-i64::from(delta)))
        } else {
            update.filter(Column::Stock.lte(i32::MAX - delta))
        };

        let result = update.exec(&self.db).await?;

        let model = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Book"))?;

        if result.rows_affected == 0 {
            return Err(if delta < 0 {
                DomainError::Validation(format!(
                    "Not enough stock for \"{}\": {} left",
                    model.title, model.stock
                ))
            } else {
                DomainError::Validation(format!(
                    "Stock for \"{}\" cannot exceed {}",
                    model.title,
                    i32::MAX
                ))
            });
        }

        Ok(Book::from(model))
    }
}

/// Make `%`, `_` and the escape character itself match literally in a LIKE pattern
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("dune"), "dune");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }
}
