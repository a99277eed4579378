//! Checkout Service - turns a cart into an order in a single transaction

use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::domain::{DomainError, Order, OrderLine, round_money};
use crate::infrastructure::repositories::cart_repository::load_cart;
use crate::models::book::{self, Entity as Book};
use crate::models::cart::{self, Entity as Cart};
use crate::models::cart_item::{self, Entity as CartItem};
use crate::models::order;
use crate::models::order_item;
use crate::models::payment::Entity as Payment;
use crate::models::shipping::Entity as Shipping;

/// Place an order for everything in the customer's cart.
///
/// Stock is decremented with `stock = stock - q WHERE stock >= q`, so two
/// concurrent checkouts cannot oversell. Any failure rolls the whole
/// transaction back: no order, no stock change, cart untouched. A checkout
/// that loses the database lock to another one is reported as a conflict.
pub async fn checkout(
    db: &DatabaseConnection,
    customer_id: i32,
    shipping_id: i32,
    payment_id: i32,
) -> Result<Order, DomainError> {
    place_order(db, customer_id, shipping_id, payment_id)
        .await
        .map_err(|e| e.busy_as_conflict("Checkout"))
}

async fn place_order(
    db: &DatabaseConnection,
    customer_id: i32,
    shipping_id: i32,
    payment_id: i32,
) -> Result<Order, DomainError> {
    let txn = db.begin().await?;

    let cart_model = Cart::find()
        .filter(cart::Column::CustomerId.eq(customer_id))
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::validation("Your cart is empty"))?;

    let cart = load_cart(&txn, cart_model).await?;
    if cart.is_empty() {
        return Err(DomainError::validation("Your cart is empty"));
    }

    let shipping = Shipping::find_by_id(shipping_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Shipping method"))?;

    let payment = Payment::find_by_id(payment_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Payment method"))?;

    if !payment.is_active() {
        return Err(DomainError::Validation(format!(
            "Payment method \"{}\" is not available",
            payment.method_name
        )));
    }

    let now = chrono::Utc::now().to_rfc3339();

    for line in &cart.items {
        let result = Book::update_many()
            .col_expr(
                book::Column::Stock,
                Expr::col(book::Column::Stock).sub(line.quantity),
            )
            .col_expr(book::Column::UpdatedAt, Expr::value(now.clone()))
            .filter(book::Column::Id.eq(line.book_id))
            .filter(book::Column::Stock.gte(line.quantity))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            tracing::warn!(
                "Checkout for customer {} aborted: book {} short of stock",
                customer_id,
                line.book_id
            );
            // Dropping `txn` rolls back the decrements already applied
            return Err(DomainError::Conflict(format!(
                "Not enough stock for \"{}\"",
                line.title
            )));
        }
    }

    let total_price = round_money(cart.total + shipping.fee);

    let order = order::ActiveModel {
        customer_id: Set(customer_id),
        total_price: Set(total_price),
        shipping_id: Set(shipping.id),
        payment_id: Set(payment.id),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(cart.items.len());
    for line in &cart.items {
        let row = order_item::ActiveModel {
            order_id: Set(order.id),
            book_id: Set(line.book_id),
            quantity: Set(line.quantity),
            price: Set(line.price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        items.push(OrderLine {
            id: row.id,
            book_id: row.book_id,
            title: line.title.clone(),
            quantity: row.quantity,
            price: row.price,
            subtotal: line.subtotal,
        });
    }

    CartItem::delete_many()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        "🧾 Order {} placed by customer {}: {} lines, total {:.2}",
        order.id,
        customer_id,
        items.len(),
        order.total_price
    );

    Ok(Order {
        id: order.id,
        customer_id: order.customer_id,
        total_price: order.total_price,
        shipping_id: order.shipping_id,
        payment_id: order.payment_id,
        created_at: order.created_at,
        items,
    })
}
