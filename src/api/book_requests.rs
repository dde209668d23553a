//! Book request endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book_request::{BookRequest, BookRequestQuery, CreateBookRequest},
};

use super::books::PaginatedResponse;

/// Request submission confirmation
#[derive(Serialize, ToSchema)]
pub struct BookRequestResponse {
    /// Confirmation message naming the requested title
    pub message: String,
    /// The stored request
    pub request: BookRequest,
}

/// List book requests
#[utoipa::path(
    get,
    path = "/book-requests",
    tag = "book-requests",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of book requests", body = PaginatedResponse<BookRequest>)
    )
)]
pub async fn list_book_requests(
    State(state): State<crate::AppState>,
    Query(query): Query<BookRequestQuery>,
) -> AppResult<Json<PaginatedResponse<BookRequest>>> {
    let (requests, total) = state.services.requests.list_requests(&query).await?;

    Ok(Json(PaginatedResponse {
        items: requests,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Submit a book request
#[utoipa::path(
    post,
    path = "/book-requests",
    tag = "book-requests",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Request created", body = BookRequestResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn create_book_request(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<BookRequestResponse>)> {
    request.validate()?;

    let created = state.services.requests.submit_request(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookRequestResponse {
            message: format!(
                "Book request for '{}' has been created. We'll notify you once it's available.",
                created.requested_title
            ),
            request: created,
        }),
    ))
}
