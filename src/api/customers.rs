//! Customer management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        borrow_record::BorrowRecord,
        customer::{CreateCustomer, Customer, CustomerQuery, UpdateCustomer},
    },
};

use super::books::PaginatedResponse;

/// List customers with pagination
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "List of customers", body = PaginatedResponse<Customer>)
    )
)]
pub async fn list_customers(
    State(state): State<crate::AppState>,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<PaginatedResponse<Customer>>> {
    let (customers, total) = state.services.customers.list_customers(&query).await?;

    Ok(Json(PaginatedResponse {
        items: customers,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get customer details by ID
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer details", body = Customer),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.get_customer(id).await?;
    Ok(Json(customer))
}

/// Create a new customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_customer(
    State(state): State<crate::AppState>,
    Json(customer): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    customer.validate()?;

    let created = state.services.customers.create_customer(customer).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing customer
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(customer): Json<UpdateCustomer>,
) -> AppResult<Json<Customer>> {
    customer.validate()?;

    let updated = state
        .services
        .customers
        .update_customer(id, customer)
        .await?;
    Ok(Json(updated))
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn delete_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.customers.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get books currently borrowed by a customer
#[utoipa::path(
    get,
    path = "/customers/{id}/borrowed-books",
    tag = "customers",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer's active borrow records", body = Vec<BorrowRecord>),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_borrowed_books(
    State(state): State<crate::AppState>,
    Path(customer_id): Path<i32>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    let records = state.services.circulation.customer_loans(customer_id).await?;
    Ok(Json(records))
}
