//! SeaORM implementation of OrderRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::{DomainError, Order, OrderLine, OrderRepository, round_money};
use crate::models::book::Entity as BookEntity;
use crate::models::order::{self, Entity as OrderEntity};
use crate::models::order_item::{self, Entity as OrderItemEntity};

pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_lines(&self, model: order::Model) -> Result<Order, DomainError> {
        let rows = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.eq(model.id))
            .find_also_related(BookEntity)
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await?;

        let items = rows
            .into_iter()
            .map(|(item, book)| OrderLine {
                id: item.id,
                book_id: item.book_id,
                title: book.map(|b| b.title).unwrap_or_default(),
                quantity: item.quantity,
                price: item.price,
                subtotal: round_money(item.price * f64::from(item.quantity)),
            })
            .collect();

        Ok(Order {
            id: model.id,
            customer_id: model.customer_id,
            total_price: model.total_price,
            shipping_id: model.shipping_id,
            payment_id: model.payment_id,
            created_at: model.created_at,
            items,
        })
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Order>, DomainError> {
        let models = OrderEntity::find()
            .filter(order::Column::CustomerId.eq(customer_id))
            // ids grow with insertion time
            .order_by_desc(order::Column::Id)
            .all(&self.db)
            .await?;

        let mut orders = Vec::with_capacity(models.len());
        for model in models {
            orders.push(self.with_lines(model).await?);
        }
        Ok(orders)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError> {
        match OrderEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.with_lines(model).await?)),
            None => Ok(None),
        }
    }
}
