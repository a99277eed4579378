//! SeaORM implementation of CartRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{Cart, CartItem, CartLine, CartRepository, DomainError};
use crate::models::book::Entity as BookEntity;
use crate::models::cart::{self, Entity as CartEntity};
use crate::models::cart_item::{self, Entity as CartItemEntity};

pub struct SeaOrmCartRepository {
    db: DatabaseConnection,
}

impl SeaOrmCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Load the lines of a cart joined with their books, oldest line first.
///
/// Generic over the connection so checkout can read the cart inside its transaction.
pub async fn load_cart<C: ConnectionTrait>(db: &C, cart: cart::Model) -> Result<Cart, DomainError> {
    let rows = CartItemEntity::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .find_also_related(BookEntity)
        .order_by_asc(cart_item::Column::Id)
        .all(db)
        .await?;

    let items = rows
        .into_iter()
        .filter_map(|(item, book)| {
            let book = book?;
            Some(CartLine::new(
                item.id,
                item.book_id,
                book.title,
                book.author,
                book.price,
                book.stock,
                item.quantity,
            ))
        })
        .collect();

    Ok(Cart::new(cart.id, cart.customer_id, items))
}

fn to_cart_item(model: cart_item::Model) -> CartItem {
    CartItem {
        id: model.id,
        cart_id: model.cart_id,
        book_id: model.book_id,
        quantity: model.quantity,
    }
}

#[async_trait]
impl CartRepository for SeaOrmCartRepository {
    async fn get_or_create(&self, customer_id: i32) -> Result<Cart, DomainError> {
        if let Some(cart) = self.find_by_customer(customer_id).await? {
            return Ok(cart);
        }

        let now = chrono::Utc::now().to_rfc3339();
        let new_cart = cart::ActiveModel {
            customer_id: Set(customer_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = match new_cart.insert(&self.db).await {
            Ok(model) => model,
            // A concurrent request created it first
            Err(e) if e.to_string().contains("UNIQUE") => {
                return self
                    .find_by_customer(customer_id)
                    .await?
                    .ok_or_else(|| DomainError::from(e));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Created cart {} for customer {}", model.id, customer_id);

        Ok(Cart::new(model.id, model.customer_id, Vec::new()))
    }

    async fn find_by_customer(&self, customer_id: i32) -> Result<Option<Cart>, DomainError> {
        let cart = CartEntity::find()
            .filter(cart::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await?;

        match cart {
            Some(cart) => Ok(Some(load_cart(&self.db, cart).await?)),
            None => Ok(None),
        }
    }

    async fn find_item(&self, item_id: i32) -> Result<Option<CartItem>, DomainError> {
        let item = CartItemEntity::find_by_id(item_id).one(&self.db).await?;
        Ok(item.map(to_cart_item))
    }

    async fn put_item(
        &self,
        cart_id: i32,
        book_id: i32,
        quantity: i32,
    ) -> Result<CartItem, DomainError> {
        let existing = CartItemEntity::find()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .filter(cart_item::Column::BookId.eq(book_id))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(item) => {
                let mut active: cart_item::ActiveModel = item.into();
                active.quantity = Set(quantity);
                active.update(&self.db).await?
            }
            None => {
                let new_item = cart_item::ActiveModel {
                    cart_id: Set(cart_id),
                    book_id: Set(book_id),
                    quantity: Set(quantity),
                    added_at: Set(chrono::Utc::now().to_rfc3339()),
                    ..Default::default()
                };
                new_item.insert(&self.db).await?
            }
        };

        Ok(to_cart_item(model))
    }

    async fn remove_item(&self, item_id: i32) -> Result<(), DomainError> {
        let result = CartItemEntity::delete_by_id(item_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Cart item"));
        }
        Ok(())
    }

    async fn clear(&self, cart_id: i32) -> Result<u64, DomainError> {
        let result = CartItemEntity::delete_many()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
