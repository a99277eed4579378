//! Repository implementations using SeaORM

pub mod book_repository;
pub mod cart_repository;
pub mod checkout_option_repository;
pub mod customer_repository;
pub mod order_repository;
pub mod rating_repository;
pub mod staff_repository;

pub use book_repository::SeaOrmBookRepository;
pub use cart_repository::SeaOrmCartRepository;
pub use checkout_option_repository::SeaOrmCheckoutOptionRepository;
pub use customer_repository::SeaOrmCustomerRepository;
pub use order_repository::SeaOrmOrderRepository;
pub use rating_repository::SeaOrmRatingRepository;
pub use staff_repository::SeaOrmStaffRepository;
