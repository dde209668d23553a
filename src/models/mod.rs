//! Data models for the Biblio server

pub mod book;
pub mod book_request;
pub mod borrow_record;
pub mod customer;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use book_request::{BookRequest, CreateBookRequest};
pub use borrow_record::{BorrowRecord, BorrowRecordDetails};
pub use customer::{CreateCustomer, Customer, UpdateCustomer};
