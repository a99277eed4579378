pub mod book;
pub mod cart;
pub mod cart_item;
pub mod customer;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod rating;
pub mod shipping;
pub mod staff;

pub use book::Book;
pub use customer::Customer;
pub use staff::StaffMember;
