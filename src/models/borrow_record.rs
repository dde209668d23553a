//! Borrow record model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Borrow record row. A null `return_date` marks an active loan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: i32,
    pub book_id: i32,
    pub customer_id: i32,
    /// Set when the loan is created, never changed afterwards
    pub checkout_date: DateTime<Utc>,
    /// Stored comparison field for the overdue listing; no policy computes it
    pub due_date: Option<NaiveDate>,
    pub return_date: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    /// Whether the book is still out
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    /// An active loan is overdue when its due date lies strictly before `as_of`
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.is_active() && self.due_date.map(|due| due < as_of).unwrap_or(false)
    }
}

/// A borrow record joined with the names used in confirmation messages
#[derive(Debug, Clone)]
pub struct BorrowRecordDetails {
    pub record: BorrowRecord,
    pub book_title: String,
    pub customer_name: String,
}

/// Borrow action payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct BorrowBook {
    pub book_id: i32,
    pub customer_id: i32,
    /// Optional due date stored on the record; nothing computes one
    pub due_date: Option<NaiveDate>,
}

/// Return action payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReturnBook {
    pub book_id: i32,
    pub customer_id: i32,
}

/// Borrow record list parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BorrowRecordQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Overdue listing parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct OverdueQuery {
    /// Reference date; defaults to today
    pub as_of: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(due_date: Option<NaiveDate>, returned: bool) -> BorrowRecord {
        BorrowRecord {
            id: 1,
            book_id: 1,
            customer_id: 1,
            checkout_date: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            due_date,
            return_date: returned.then(|| Utc.with_ymd_and_hms(2024, 5, 10, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_overdue_when_due_before_reference_date() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();
        assert!(record(Some(yesterday), false).is_overdue(today));
    }

    #[test]
    fn test_not_overdue_when_due_later_or_same_day() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 5, 21).unwrap();
        assert!(!record(Some(tomorrow), false).is_overdue(today));
        // Strictly before: due today is not yet overdue.
        assert!(!record(Some(today), false).is_overdue(today));
    }

    #[test]
    fn test_never_overdue_without_due_date() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        assert!(!record(None, false).is_overdue(today));
    }

    #[test]
    fn test_returned_record_is_neither_active_nor_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();
        let rec = record(Some(yesterday), true);
        assert!(!rec.is_active());
        assert!(!rec.is_overdue(today));
    }
}
