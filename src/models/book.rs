use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: i32,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u64>,
}

impl Book {
    /// Whether `quantity` more copies can be taken from stock.
    pub fn can_purchase(&self, quantity: i32) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            price: model.price,
            available: model.stock > 0,
            stock: model.stock,
            average_rating: None,
            rating_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(stock: i32) -> Model {
        Model {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            price: 120000.0,
            stock,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn availability_follows_stock() {
        assert!(Book::from(model(3)).available);
        assert!(!Book::from(model(0)).available);
    }

    #[test]
    fn can_purchase_checks_quantity_against_stock() {
        let book = Book::from(model(2));
        assert!(book.can_purchase(2));
        assert!(!book.can_purchase(3));
        assert!(!book.can_purchase(0));
    }
}
