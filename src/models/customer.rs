//! Customer model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Customer row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Set once when the customer is created
    pub joined_date: NaiveDate,
}

/// Create customer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    /// Email address, unique across customers
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
}

/// Update customer request; `joined_date` is immutable
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Customer list parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CustomerQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
