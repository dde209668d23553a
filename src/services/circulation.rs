//! Circulation service: borrow, return, and loan queries
//!
//! The copy-count bookkeeping itself lives in the repository transaction;
//! this layer adds the existence checks that belong to reads and keeps the
//! handlers free of query details.

use chrono::{NaiveDate, Utc};

use crate::{
    error::AppResult,
    models::borrow_record::{
        BorrowBook, BorrowRecord, BorrowRecordDetails, BorrowRecordQuery, ReturnBook,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for a customer
    pub async fn borrow_book(&self, borrow: BorrowBook) -> AppResult<BorrowRecordDetails> {
        let details = self
            .repository
            .borrow_records
            .checkout(borrow.book_id, borrow.customer_id, borrow.due_date)
            .await?;

        tracing::info!(
            record_id = details.record.id,
            book_id = borrow.book_id,
            customer_id = borrow.customer_id,
            "book borrowed"
        );

        Ok(details)
    }

    /// Return a borrowed book
    pub async fn return_book(&self, ret: ReturnBook) -> AppResult<BorrowRecordDetails> {
        let details = self
            .repository
            .borrow_records
            .check_in(ret.book_id, ret.customer_id)
            .await?;

        tracing::info!(
            record_id = details.record.id,
            book_id = ret.book_id,
            customer_id = ret.customer_id,
            "book returned"
        );

        Ok(details)
    }

    /// List all borrow records
    pub async fn list_records(
        &self,
        query: &BorrowRecordQuery,
    ) -> AppResult<(Vec<BorrowRecord>, i64)> {
        self.repository.borrow_records.list(query).await
    }

    /// Active loans for a customer
    pub async fn customer_loans(&self, customer_id: i32) -> AppResult<Vec<BorrowRecord>> {
        // Verify customer exists
        self.repository.customers.get_by_id(customer_id).await?;
        self.repository
            .borrow_records
            .list_active_for_customer(customer_id)
            .await
    }

    /// Overdue loans as of the given date, defaulting to today
    pub async fn list_overdue(&self, as_of: Option<NaiveDate>) -> AppResult<Vec<BorrowRecord>> {
        let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
        self.repository.borrow_records.list_overdue(as_of).await
    }
}
