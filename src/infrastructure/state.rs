//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    BookRepository, CartRepository, CheckoutOptionRepository, CustomerRepository, OrderRepository,
    RatingRepository, StaffRepository,
};
use crate::infrastructure::auth::JwtKeys;
use crate::infrastructure::{
    SeaOrmBookRepository, SeaOrmCartRepository, SeaOrmCheckoutOptionRepository,
    SeaOrmCustomerRepository, SeaOrmOrderRepository, SeaOrmRatingRepository,
    SeaOrmStaffRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection, used directly by checkout for its transaction
    db: DatabaseConnection,
    /// Token signing keys
    pub jwt: JwtKeys,
    pub book_repo: Arc<dyn BookRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub cart_repo: Arc<dyn CartRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub option_repo: Arc<dyn CheckoutOptionRepository>,
    pub rating_repo: Arc<dyn RatingRepository>,
    pub staff_repo: Arc<dyn StaffRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, jwt: JwtKeys) -> Self {
        Self {
            book_repo: Arc::new(SeaOrmBookRepository::new(db.clone())),
            customer_repo: Arc::new(SeaOrmCustomerRepository::new(db.clone())),
            cart_repo: Arc::new(SeaOrmCartRepository::new(db.clone())),
            order_repo: Arc::new(SeaOrmOrderRepository::new(db.clone())),
            option_repo: Arc::new(SeaOrmCheckoutOptionRepository::new(db.clone())),
            rating_repo: Arc::new(SeaOrmRatingRepository::new(db.clone())),
            staff_repo: Arc::new(SeaOrmStaffRepository::new(db.clone())),
            jwt,
            db,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
