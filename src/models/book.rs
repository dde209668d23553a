//! Book (catalog entry) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book row as stored in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_date: NaiveDate,
    /// Units not currently on loan; written only by borrow and return
    pub copies_available: i32,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    /// ISBN-10 or ISBN-13, unique across the catalog
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10 to 13 characters"))]
    pub isbn: String,
    pub published_date: NaiveDate,
    /// Initial stock; defaults to a single copy
    #[serde(default = "default_copies")]
    #[validate(range(min = 0, message = "copies_available must not be negative"))]
    pub copies_available: i32,
}

fn default_copies() -> i32 {
    1
}

/// Update book request.
///
/// `copies_available` is deliberately absent: the circulation service is
/// the only writer of the copy counter.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10 to 13 characters"))]
    pub isbn: Option<String>,
    pub published_date: Option<NaiveDate>,
}

/// Book list/search parameters; title and author are exact-match filters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_book_defaults_to_one_copy() {
        let create: CreateBook = serde_json::from_value(serde_json::json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "isbn": "9780441172719",
            "published_date": "1965-08-01"
        }))
        .unwrap();
        assert_eq!(create.copies_available, 1);
    }

    #[test]
    fn test_create_book_rejects_empty_title() {
        let create: CreateBook = serde_json::from_value(serde_json::json!({
            "title": "",
            "author": "Frank Herbert",
            "isbn": "9780441172719",
            "published_date": "1965-08-01"
        }))
        .unwrap();
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_create_book_rejects_short_isbn() {
        let create: CreateBook = serde_json::from_value(serde_json::json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "isbn": "12345",
            "published_date": "1965-08-01"
        }))
        .unwrap();
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_update_book_skips_absent_fields() {
        let update: UpdateBook = serde_json::from_value(serde_json::json!({
            "title": "Dune Messiah"
        }))
        .unwrap();
        assert!(update.validate().is_ok());
        assert!(update.author.is_none());
    }
}
