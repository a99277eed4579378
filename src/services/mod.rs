//! Services Layer
//!
//! Business rules that sit between the HTTP handlers and the repositories.

pub mod account_service;
pub mod book_service;
pub mod cart_service;
pub mod checkout_service;
pub mod recommendation_service;
