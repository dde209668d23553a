//! API handlers for the REST endpoints

pub mod book_requests;
pub mod books;
pub mod circulation;
pub mod customers;
pub mod health;
pub mod openapi;
