use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book_request::{BookRequest, BookRequestQuery},
};

#[derive(Clone)]
pub struct BookRequestsRepository {
    pool: Pool<Postgres>,
}

impl BookRequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List acquisition requests, newest first
    pub async fn list(&self, query: &BookRequestQuery) -> AppResult<(Vec<BookRequest>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).max(1);
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_requests")
            .fetch_one(&self.pool)
            .await?;

        let requests = sqlx::query_as::<_, BookRequest>(&format!(
            "SELECT * FROM book_requests ORDER BY date_requested DESC, id DESC LIMIT {} OFFSET {}",
            per_page, offset
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok((requests, total))
    }

    pub async fn create(
        &self,
        customer_id: i32,
        title: &str,
        author: Option<&str>,
        fee: Decimal,
    ) -> AppResult<BookRequest> {
        let request = sqlx::query_as::<_, BookRequest>(
            r#"
            INSERT INTO book_requests (customer_id, requested_title, requested_author, date_requested, is_fulfilled, fee)
            VALUES ($1, $2, $3, $4, FALSE, $5)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(title)
        .bind(author)
        .bind(Utc::now().date_naive())
        .bind(fee)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }
}
