//! Borrow and return endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::borrow_record::{
        BorrowBook, BorrowRecord, BorrowRecordQuery, OverdueQuery, ReturnBook,
    },
};

use super::books::PaginatedResponse;

/// Borrow/return confirmation with the updated record
#[derive(Serialize, ToSchema)]
pub struct CirculationResponse {
    /// Confirmation message naming the customer and the book
    pub message: String,
    /// The borrow record after the action
    pub record: BorrowRecord,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "circulation",
    request_body = BorrowBook,
    responses(
        (status = 201, description = "Book borrowed", body = CirculationResponse),
        (status = 404, description = "Book or customer not found"),
        (status = 409, description = "No copies available, or customer already borrowed this book")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(borrow): Json<BorrowBook>,
) -> AppResult<(StatusCode, Json<CirculationResponse>)> {
    let details = state.services.circulation.borrow_book(borrow).await?;

    Ok((
        StatusCode::CREATED,
        Json(CirculationResponse {
            message: format!(
                "{} borrowed '{}' successfully!",
                details.customer_name, details.book_title
            ),
            record: details.record,
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/return",
    tag = "circulation",
    request_body = ReturnBook,
    responses(
        (status = 200, description = "Book returned", body = CirculationResponse),
        (status = 404, description = "Book, customer, or active borrow record not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Json(ret): Json<ReturnBook>,
) -> AppResult<Json<CirculationResponse>> {
    let details = state.services.circulation.return_book(ret).await?;

    Ok(Json(CirculationResponse {
        message: format!(
            "{} returned '{}' successfully!",
            details.customer_name, details.book_title
        ),
        record: details.record,
    }))
}

/// List all borrow records
#[utoipa::path(
    get,
    path = "/borrow-records",
    tag = "circulation",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of borrow records", body = PaginatedResponse<BorrowRecord>)
    )
)]
pub async fn list_borrow_records(
    State(state): State<crate::AppState>,
    Query(query): Query<BorrowRecordQuery>,
) -> AppResult<Json<PaginatedResponse<BorrowRecord>>> {
    let (records, total) = state.services.circulation.list_records(&query).await?;

    Ok(Json(PaginatedResponse {
        items: records,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// List overdue borrow records
#[utoipa::path(
    get,
    path = "/borrow-records/overdue",
    tag = "circulation",
    params(
        ("as_of" = Option<String>, Query, description = "Reference date (YYYY-MM-DD), defaults to today")
    ),
    responses(
        (status = 200, description = "Active records due strictly before the reference date", body = Vec<BorrowRecord>)
    )
)]
pub async fn list_overdue(
    State(state): State<crate::AppState>,
    Query(query): Query<OverdueQuery>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    let records = state.services.circulation.list_overdue(query.as_of).await?;
    Ok(Json(records))
}
