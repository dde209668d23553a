//! Repository layer for database operations

pub mod book_requests;
pub mod books;
pub mod borrow_records;
pub mod customers;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub customers: customers::CustomersRepository,
    pub borrow_records: borrow_records::BorrowRecordsRepository,
    pub book_requests: book_requests::BookRequestsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            customers: customers::CustomersRepository::new(pool.clone()),
            borrow_records: borrow_records::BorrowRecordsRepository::new(pool.clone()),
            book_requests: book_requests::BookRequestsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connectivity probe used by the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
