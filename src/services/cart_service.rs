//! Cart Service - rules for adding, changing and removing cart lines
//!
//! Stock is only checked here, never reserved: it is decremented at checkout.

use crate::domain::{BookRepository, Cart, CartItem, CartRepository, DomainError};

/// Load the caller's cart item, rejecting items that belong to another cart
async fn owned_item(
    carts: &dyn CartRepository,
    customer_id: i32,
    item_id: i32,
) -> Result<(Cart, CartItem), DomainError> {
    let item = carts
        .find_item(item_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Cart item"))?;

    match carts.find_by_customer(customer_id).await? {
        Some(cart) if cart.id == item.cart_id => Ok((cart, item)),
        _ => Err(DomainError::Forbidden(
            "This item belongs to another customer's cart".to_string(),
        )),
    }
}

pub async fn view(carts: &dyn CartRepository, customer_id: i32) -> Result<Cart, DomainError> {
    carts.get_or_create(customer_id).await
}

/// Add `quantity` copies of a book; the same book again adds to the existing line
pub async fn add_item(
    carts: &dyn CartRepository,
    books: &dyn BookRepository,
    customer_id: i32,
    book_id: i32,
    quantity: i32,
) -> Result<Cart, DomainError> {
    if quantity < 1 {
        return Err(DomainError::validation("Quantity must be at least 1"));
    }

    let book = books
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Book"))?;

    if book.stock <= 0 {
        return Err(DomainError::Validation(format!(
            "\"{}\" is out of stock",
            book.title
        )));
    }

    let cart = carts.get_or_create(customer_id).await?;
    let in_cart = cart.quantity_of(book_id);
    let Some(wanted) = in_cart
        .checked_add(quantity)
        .filter(|wanted| book.can_purchase(*wanted))
    else {
        return Err(DomainError::Validation(format!(
            "Only {} of \"{}\" in stock ({} already in cart)",
            book.stock, book.title, in_cart
        )));
    };

    carts.put_item(cart.id, book_id, wanted).await?;
    tracing::debug!(
        "Cart {}: book {} quantity {} -> {}",
        cart.id,
        book_id,
        in_cart,
        wanted
    );

    carts.get_or_create(customer_id).await
}

/// Set the quantity of a line; zero or less removes it
pub async fn update_item(
    carts: &dyn CartRepository,
    books: &dyn BookRepository,
    customer_id: i32,
    item_id: i32,
    quantity: i32,
) -> Result<Cart, DomainError> {
    let (cart, item) = owned_item(carts, customer_id, item_id).await?;

    if quantity <= 0 {
        carts.remove_item(item.id).await?;
        return carts.get_or_create(customer_id).await;
    }

    let stock = match cart.items.iter().find(|line| line.id == item.id) {
        Some(line) => line.stock,
        None => {
            books
                .find_by_id(item.book_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Book"))?
                .stock
        }
    };

    if quantity > stock {
        return Err(DomainError::Validation(format!(
            "Only {} in stock",
            stock
        )));
    }

    carts.put_item(cart.id, item.book_id, quantity).await?;
    carts.get_or_create(customer_id).await
}

pub async fn remove_item(
    carts: &dyn CartRepository,
    customer_id: i32,
    item_id: i32,
) -> Result<Cart, DomainError> {
    let (_, item) = owned_item(carts, customer_id, item_id).await?;
    carts.remove_item(item.id).await?;
    carts.get_or_create(customer_id).await
}

pub async fn clear(carts: &dyn CartRepository, customer_id: i32) -> Result<Cart, DomainError> {
    let cart = carts.get_or_create(customer_id).await?;
    let removed = carts.clear(cart.id).await?;
    tracing::debug!("Cleared {} lines from cart {}", removed, cart.id);
    Ok(Cart::new(cart.id, cart.customer_id, Vec::new()))
}
