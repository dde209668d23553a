//! Borrow records repository: circulation transactions and loan queries
//!
//! `copies_available` and the set of open borrow records are two views of
//! the same fact. Checkout and check-in are therefore single transactions
//! that lock the book row first, so the counter and the records cannot
//! diverge under concurrent calls.

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrow_record::{BorrowRecord, BorrowRecordDetails, BorrowRecordQuery},
};

#[derive(Clone)]
pub struct BorrowRecordsRepository {
    pool: Pool<Postgres>,
}

impl BorrowRecordsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all borrow records, newest checkout first
    pub async fn list(&self, query: &BorrowRecordQuery) -> AppResult<(Vec<BorrowRecord>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).max(1);
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records")
            .fetch_one(&self.pool)
            .await?;

        let records = sqlx::query_as::<_, BorrowRecord>(&format!(
            "SELECT * FROM borrow_records ORDER BY checkout_date DESC, id DESC LIMIT {} OFFSET {}",
            per_page, offset
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok((records, total))
    }

    /// Active loans for one customer
    pub async fn list_active_for_customer(&self, customer_id: i32) -> AppResult<Vec<BorrowRecord>> {
        let records = sqlx::query_as::<_, BorrowRecord>(
            r#"
            SELECT * FROM borrow_records
            WHERE customer_id = $1 AND return_date IS NULL
            ORDER BY checkout_date
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Active loans whose due date lies strictly before `as_of`
    pub async fn list_overdue(&self, as_of: NaiveDate) -> AppResult<Vec<BorrowRecord>> {
        let records = sqlx::query_as::<_, BorrowRecord>(
            r#"
            SELECT * FROM borrow_records
            WHERE return_date IS NULL
              AND due_date IS NOT NULL
              AND due_date < $1
            ORDER BY due_date, id
            "#,
        )
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Borrow a book: create the record and decrement the copy counter in
    /// one transaction.
    ///
    /// Failure modes, checked in order: unknown book, unknown customer,
    /// no copies left, loan already open for this (customer, book) pair.
    pub async fn checkout(
        &self,
        book_id: i32,
        customer_id: i32,
        due_date: Option<NaiveDate>,
    ) -> AppResult<BorrowRecordDetails> {
        let mut tx = self.pool.begin().await?;

        // Lock the book row; concurrent checkouts of the same book
        // serialize here.
        let book_row: Option<(String, i32)> =
            sqlx::query_as("SELECT title, copies_available FROM books WHERE id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;

        let (book_title, copies_available) = book_row
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        let customer_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM customers WHERE id = $1")
                .bind(customer_id)
                .fetch_optional(&mut *tx)
                .await?;
        let customer_name = customer_name.ok_or_else(|| {
            AppError::NotFound(format!("Customer with id {} not found", customer_id))
        })?;

        if copies_available < 1 {
            return Err(AppError::Unavailable(
                "No copies available for this book".to_string(),
            ));
        }

        let already_borrowed: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM borrow_records
                WHERE book_id = $1 AND customer_id = $2 AND return_date IS NULL
            )
            "#,
        )
        .bind(book_id)
        .bind(customer_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_borrowed {
            return Err(AppError::Conflict(
                "This customer already borrowed this book".to_string(),
            ));
        }

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrow_records (book_id, customer_id, checkout_date, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(customer_id)
        .bind(Utc::now())
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        // Guarded decrement; with the row locked above this can only miss
        // if the availability check was bypassed.
        let updated = sqlx::query(
            "UPDATE books SET copies_available = copies_available - 1 WHERE id = $1 AND copies_available >= 1",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() != 1 {
            return Err(AppError::Unavailable(
                "No copies available for this book".to_string(),
            ));
        }

        tx.commit().await?;

        Ok(BorrowRecordDetails {
            record,
            book_title,
            customer_name,
        })
    }

    /// Return a book: stamp the open record and increment the copy counter
    /// in one transaction.
    pub async fn check_in(&self, book_id: i32, customer_id: i32) -> AppResult<BorrowRecordDetails> {
        let mut tx = self.pool.begin().await?;

        let book_title: Option<String> =
            sqlx::query_scalar("SELECT title FROM books WHERE id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;
        let book_title = book_title
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        let customer_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM customers WHERE id = $1")
                .bind(customer_id)
                .fetch_optional(&mut *tx)
                .await?;
        let customer_name = customer_name.ok_or_else(|| {
            AppError::NotFound(format!("Customer with id {} not found", customer_id))
        })?;

        // The partial unique index guarantees at most one open record per
        // (customer, book) pair.
        let open_record_id: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT id FROM borrow_records
            WHERE book_id = $1 AND customer_id = $2 AND return_date IS NULL
            "#,
        )
        .bind(book_id)
        .bind(customer_id)
        .fetch_optional(&mut *tx)
        .await?;

        let record_id = open_record_id.ok_or_else(|| {
            AppError::NotFound(
                "No active borrow record found for this book and customer".to_string(),
            )
        })?;

        // Return timestamp is the current time, not the checkout date.
        let record = sqlx::query_as::<_, BorrowRecord>(
            "UPDATE borrow_records SET return_date = $2 WHERE id = $1 RETURNING *",
        )
        .bind(record_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        // Unconditional: the open record is authoritative for what was out.
        // The data model tracks no total-copies ceiling.
        sqlx::query("UPDATE books SET copies_available = copies_available + 1 WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(BorrowRecordDetails {
            record,
            book_title,
            customer_name,
        })
    }
}
