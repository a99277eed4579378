//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::Serialize;

use super::DomainError;
use crate::models::{Book, Customer, StaffMember};

/// Round a money amount to two decimals.
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Mean of `count` rating scores summing to `sum`, rounded like a price.
/// `None` when nothing was rated.
pub fn average_score(sum: i64, count: u64) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some(round_money(sum as f64 / count as f64))
}

/// Filter criteria for catalog queries
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    /// Case-insensitive match against title or author
    pub search: Option<String>,
}

/// Input for creating a book
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: i32,
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books matching the filter, ordered by id
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID, with rating statistics
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Create a new book
    async fn create(&self, book: NewBook) -> Result<Book, DomainError>;

    /// Add `delta` (possibly negative) to the stock in one statement.
    /// Fails with `Validation` when the result would be negative.
    async fn adjust_stock(&self, id: i32, delta: i32) -> Result<Book, DomainError>;
}

/// Input for creating a customer; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// A customer together with its stored password hash, for login only
#[derive(Debug, Clone)]
pub struct CustomerCredentials {
    pub customer: Customer,
    pub password_hash: String,
}

/// Repository trait for Customer entity
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Customer>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;

    async fn find_credentials(&self, email: &str)
    -> Result<Option<CustomerCredentials>, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Create a new customer. A duplicate email yields `Conflict`.
    async fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError>;
}

/// One line of a cart, joined with its book
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub id: i32,
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub price: f64,
    #[serde(skip)]
    pub stock: i32,
    pub quantity: i32,
    pub subtotal: f64,
}

impl CartLine {
    pub fn new(
        id: i32,
        book_id: i32,
        title: String,
        author: String,
        price: f64,
        stock: i32,
        quantity: i32,
    ) -> Self {
        Self {
            id,
            book_id,
            title,
            author,
            price,
            stock,
            quantity,
            subtotal: round_money(price * f64::from(quantity)),
        }
    }
}

/// A customer's cart with computed totals
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub id: i32,
    pub customer_id: i32,
    pub items: Vec<CartLine>,
    pub total: f64,
    pub item_count: usize,
    pub total_quantity: i64,
}

impl Cart {
    pub fn new(id: i32, customer_id: i32, items: Vec<CartLine>) -> Self {
        let total = round_money(items.iter().map(|i| i.price * f64::from(i.quantity)).sum());
        let total_quantity = items.iter().map(|i| i64::from(i.quantity)).sum();
        Self {
            id,
            customer_id,
            item_count: items.len(),
            items,
            total,
            total_quantity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of `book_id` already in the cart
    pub fn quantity_of(&self, book_id: i32) -> i32 {
        self.items
            .iter()
            .filter(|i| i.book_id == book_id)
            .map(|i| i.quantity)
            .sum()
    }
}

/// A raw cart row, used for ownership checks
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub book_id: i32,
    pub quantity: i32,
}

/// Repository trait for carts and their items
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Return the customer's cart, creating an empty one if needed
    async fn get_or_create(&self, customer_id: i32) -> Result<Cart, DomainError>;

    async fn find_by_customer(&self, customer_id: i32) -> Result<Option<Cart>, DomainError>;

    async fn find_item(&self, item_id: i32) -> Result<Option<CartItem>, DomainError>;

    /// Set the quantity of `book_id` in the cart, inserting the line if absent
    async fn put_item(
        &self,
        cart_id: i32,
        book_id: i32,
        quantity: i32,
    ) -> Result<CartItem, DomainError>;

    async fn remove_item(&self, item_id: i32) -> Result<(), DomainError>;

    /// Remove every line; returns the number removed
    async fn clear(&self, cart_id: i32) -> Result<u64, DomainError>;
}

/// One purchased line of an order
#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    pub id: i32,
    pub book_id: i32,
    pub title: String,
    pub quantity: i32,
    pub price: f64,
    pub subtotal: f64,
}

/// An order with its lines
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub total_price: f64,
    pub shipping_id: i32,
    pub payment_id: i32,
    pub created_at: String,
    pub items: Vec<OrderLine>,
}

/// Repository trait for reading orders; orders are written by checkout
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders of a customer, newest first
    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Order>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ShippingMethod {
    pub id: i32,
    pub method_name: String,
    pub fee: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethod {
    pub id: i32,
    pub method_name: String,
    pub status: String,
}

/// Repository trait for shipping and payment methods
#[async_trait]
pub trait CheckoutOptionRepository: Send + Sync {
    async fn list_shipping(&self) -> Result<Vec<ShippingMethod>, DomainError>;

    /// Payment methods; only active ones when `active_only`
    async fn list_payments(&self, active_only: bool) -> Result<Vec<PaymentMethod>, DomainError>;

    async fn create_shipping(&self, method_name: &str, fee: f64)
    -> Result<ShippingMethod, DomainError>;

    async fn create_payment(&self, method_name: &str, status: &str)
    -> Result<PaymentMethod, DomainError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    pub customer_id: i32,
    pub book_id: i32,
    pub score: i32,
}

/// Repository trait for book ratings
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert or replace the customer's score for a book
    async fn upsert(&self, customer_id: i32, book_id: i32, score: i32)
    -> Result<Rating, DomainError>;

    /// Average score and count for a book
    async fn stats(&self, book_id: i32) -> Result<(Option<f64>, u64), DomainError>;
}

#[derive(Debug, Clone)]
pub struct NewStaff {
    pub name: String,
    pub role: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct StaffCredentials {
    pub staff: StaffMember,
    pub password_hash: String,
}

/// Repository trait for staff accounts
#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<StaffMember>, DomainError>;

    async fn find_credentials(&self, email: &str) -> Result<Option<StaffCredentials>, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    async fn create(&self, staff: NewStaff) -> Result<StaffMember, DomainError>;
}
