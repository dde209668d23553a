//! Book request model and related types
//!
//! Requests are free text: the title may not exist in the catalog yet, so
//! there is no foreign key to `books`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book request row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookRequest {
    pub id: i32,
    pub customer_id: i32,
    pub requested_title: String,
    pub requested_author: Option<String>,
    pub date_requested: NaiveDate,
    /// Flipped by an administrative process outside this server
    pub is_fulfilled: bool,
    pub fee: Decimal,
}

/// Create book request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookRequest {
    pub customer_id: i32,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub author: Option<String>,
    /// Optional handling fee; defaults to zero
    #[serde(default)]
    #[validate(custom(function = "validate_fee"))]
    pub fee: Decimal,
}

fn validate_fee(fee: &Decimal) -> Result<(), validator::ValidationError> {
    if fee.is_sign_negative() {
        return Err(validator::ValidationError::new("fee_must_not_be_negative"));
    }
    Ok(())
}

/// Book request list parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookRequestQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
