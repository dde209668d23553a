//! Book request intake service

use crate::{
    error::AppResult,
    models::book_request::{BookRequest, BookRequestQuery, CreateBookRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List book requests
    pub async fn list_requests(
        &self,
        query: &BookRequestQuery,
    ) -> AppResult<(Vec<BookRequest>, i64)> {
        self.repository.book_requests.list(query).await
    }

    /// Submit a new book request.
    ///
    /// The requested title is free text and is never matched against the
    /// catalog; duplicate requests are allowed.
    pub async fn submit_request(&self, request: CreateBookRequest) -> AppResult<BookRequest> {
        // Verify customer exists
        self.repository
            .customers
            .get_by_id(request.customer_id)
            .await?;

        let created = self
            .repository
            .book_requests
            .create(
                request.customer_id,
                &request.title,
                request.author.as_deref(),
                request.fee,
            )
            .await?;

        tracing::info!(
            request_id = created.id,
            customer_id = created.customer_id,
            "book request submitted"
        );

        Ok(created)
    }
}
