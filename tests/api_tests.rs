//! API integration tests
//!
//! These run against a live server with a clean database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so reruns don't trip the ISBN/email uniqueness checks
fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

/// Create a book and return its id
async fn create_book(client: &Client, copies: i32) -> i64 {
    let isbn = format!("97{:011}", unique_suffix() % 100_000_000_000);
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Integration Test Book",
            "author": "Test Author",
            "isbn": isbn,
            "published_date": "1999-01-01",
            "copies_available": copies
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

/// Create a customer and return its id
async fn create_customer(client: &Client) -> i64 {
    let email = format!("reader{}@test.example", unique_suffix());
    let response = client
        .post(format!("{}/customers", BASE_URL))
        .json(&json!({
            "name": "Test Reader",
            "email": email
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No customer ID")
}

async fn get_book(client: &Client, id: i64) -> Value {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_book_crud_roundtrip() {
    let client = Client::new();
    let book_id = create_book(&client, 3).await;

    // Read back
    let body = get_book(&client, book_id).await;
    assert_eq!(body["title"], "Integration Test Book");
    assert_eq!(body["copies_available"], 3);

    // Partial update leaves other fields alone
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "title": "Renamed Test Book" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body = get_book(&client, book_id).await;
    assert_eq!(body["title"], "Renamed Test Book");
    assert_eq!(body["author"], "Test Author");

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_duplicate_isbn() {
    let client = Client::new();
    let isbn = format!("97{:011}", unique_suffix() % 100_000_000_000);

    let payload = json!({
        "title": "First Copy",
        "author": "Test Author",
        "isbn": isbn,
        "published_date": "1999-01-01"
    });

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_empty_title() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "",
            "author": "Test Author",
            "isbn": format!("97{:011}", unique_suffix() % 100_000_000_000),
            "published_date": "1999-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
#[ignore]
async fn test_create_customer_rejects_duplicate_email() {
    let client = Client::new();
    let email = format!("dup{}@test.example", unique_suffix());

    let payload = json!({ "name": "Test Reader", "email": email });

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

// Borrow then return: the copy counter round-trips and the record is
// stamped with a return date.
#[tokio::test]
#[ignore]
async fn test_borrow_then_return_roundtrip() {
    let client = Client::new();
    let book_id = create_book(&client, 2).await;
    let customer_id = create_customer(&client).await;

    // Borrow
    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer_id": customer_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .expect("No message")
        .contains("borrowed"));
    assert!(body["record"]["return_date"].is_null());

    let book = get_book(&client, book_id).await;
    assert_eq!(book["copies_available"], 1);

    // The active loan shows up under the customer
    let response = client
        .get(format!(
            "{}/customers/{}/borrowed-books",
            BASE_URL, customer_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let records: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(records.as_array().expect("Not an array").len(), 1);

    // Return
    let response = client
        .post(format!("{}/return", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer_id": customer_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .expect("No message")
        .contains("returned"));
    assert!(body["record"]["return_date"].is_string());

    let book = get_book(&client, book_id).await;
    assert_eq!(book["copies_available"], 2);

    // No active loans left
    let response = client
        .get(format!(
            "{}/customers/{}/borrowed-books",
            BASE_URL, customer_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    let records: Value = response.json().await.expect("Failed to parse response");
    assert!(records.as_array().expect("Not an array").is_empty());
}

// A second borrow of the same book by the same customer is refused while
// the first is still open, and allowed again after the return.
#[tokio::test]
#[ignore]
async fn test_double_borrow_is_refused_until_returned() {
    let client = Client::new();
    let book_id = create_book(&client, 5).await;
    let customer_id = create_customer(&client).await;

    let payload = json!({ "book_id": book_id, "customer_id": customer_id });

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "conflict");

    // Copies dropped exactly once
    let book = get_book(&client, book_id).await;
    assert_eq!(book["copies_available"], 4);

    let response = client
        .post(format!("{}/return", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    // Open slot again: a fresh borrow succeeds
    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

// A book with no copies left refuses further borrows without creating a
// record or touching the counter.
#[tokio::test]
#[ignore]
async fn test_borrow_exhausted_book_is_unavailable() {
    let client = Client::new();
    let book_id = create_book(&client, 1).await;
    let first = create_customer(&client).await;
    let second = create_customer(&client).await;

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer_id": first }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer_id": second }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "unavailable");

    let book = get_book(&client, book_id).await;
    assert_eq!(book["copies_available"], 0);

    // The refused customer has no record
    let response = client
        .get(format!("{}/customers/{}/borrowed-books", BASE_URL, second))
        .send()
        .await
        .expect("Failed to send request");
    let records: Value = response.json().await.expect("Failed to parse response");
    assert!(records.as_array().expect("Not an array").is_empty());
}

// Returning without an open loan fails and leaves the counter alone.
#[tokio::test]
#[ignore]
async fn test_return_without_active_loan_fails() {
    let client = Client::new();
    let book_id = create_book(&client, 2).await;
    let customer_id = create_customer(&client).await;

    let response = client
        .post(format!("{}/return", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer_id": customer_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "not_found");

    let book = get_book(&client, book_id).await;
    assert_eq!(book["copies_available"], 2);
}

#[tokio::test]
#[ignore]
async fn test_borrow_unknown_book_or_customer_is_404() {
    let client = Client::new();
    let customer_id = create_customer(&client).await;
    let book_id = create_book(&client, 1).await;

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "book_id": 999999999, "customer_id": customer_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer_id": 999999999 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

// Overdue listing: due-yesterday shows up, due-tomorrow does not, and a
// returned record disappears even when its due date has passed.
#[tokio::test]
#[ignore]
async fn test_overdue_listing() {
    let client = Client::new();
    let overdue_book = create_book(&client, 1).await;
    let current_book = create_book(&client, 1).await;
    let customer_id = create_customer(&client).await;

    let today = chrono::Utc::now().date_naive();
    let yesterday = today.pred_opt().expect("no yesterday");
    let tomorrow = today.succ_opt().expect("no tomorrow");

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({
            "book_id": overdue_book,
            "customer_id": customer_id,
            "due_date": yesterday.to_string()
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let overdue_record: Value = response.json().await.expect("Failed to parse response");
    let overdue_id = overdue_record["record"]["id"].as_i64().expect("No record ID");

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({
            "book_id": current_book,
            "customer_id": customer_id,
            "due_date": tomorrow.to_string()
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let current_record: Value = response.json().await.expect("Failed to parse response");
    let current_id = current_record["record"]["id"].as_i64().expect("No record ID");

    let response = client
        .get(format!("{}/borrow-records/overdue", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let records: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = records
        .as_array()
        .expect("Not an array")
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert!(ids.contains(&overdue_id));
    assert!(!ids.contains(&current_id));

    // After the return the record leaves the overdue list
    let response = client
        .post(format!("{}/return", BASE_URL))
        .json(&json!({ "book_id": overdue_book, "customer_id": customer_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/borrow-records/overdue", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let records: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = records
        .as_array()
        .expect("Not an array")
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert!(!ids.contains(&overdue_id));
}

#[tokio::test]
#[ignore]
async fn test_overdue_listing_honors_as_of() {
    let client = Client::new();
    let book_id = create_book(&client, 1).await;
    let customer_id = create_customer(&client).await;

    let today = chrono::Utc::now().date_naive();
    let tomorrow = today.succ_opt().expect("no tomorrow");
    let next_week = today + chrono::Days::new(7);

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "customer_id": customer_id,
            "due_date": tomorrow.to_string()
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let record_id = body["record"]["id"].as_i64().expect("No record ID");

    // Not overdue today, overdue from next week's viewpoint
    let response = client
        .get(format!(
            "{}/borrow-records/overdue?as_of={}",
            BASE_URL, next_week
        ))
        .send()
        .await
        .expect("Failed to send request");
    let records: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = records
        .as_array()
        .expect("Not an array")
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert!(ids.contains(&record_id));
}

#[tokio::test]
#[ignore]
async fn test_list_borrow_records() {
    let client = Client::new();

    let response = client
        .get(format!("{}/borrow-records", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
}

// A request for a title with no catalog match succeeds; the fee defaults
// to zero and the request starts unfulfilled.
#[tokio::test]
#[ignore]
async fn test_book_request_for_unknown_title() {
    let client = Client::new();
    let customer_id = create_customer(&client).await;

    let response = client
        .post(format!("{}/book-requests", BASE_URL))
        .json(&json!({
            "customer_id": customer_id,
            "title": "A Title Nobody Catalogued"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .expect("No message")
        .contains("A Title Nobody Catalogued"));
    assert_eq!(body["request"]["is_fulfilled"], false);
    assert_eq!(
        body["request"]["fee"].as_str().map(|f| f.parse::<f64>().expect("fee not numeric")),
        Some(0.0)
    );
}

#[tokio::test]
#[ignore]
async fn test_book_request_unknown_customer_is_404() {
    let client = Client::new();

    let response = client
        .post(format!("{}/book-requests", BASE_URL))
        .json(&json!({
            "customer_id": 999999999,
            "title": "Anything"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_book_request_rejects_negative_fee() {
    let client = Client::new();
    let customer_id = create_customer(&client).await;

    let response = client
        .post(format!("{}/book-requests", BASE_URL))
        .json(&json!({
            "customer_id": customer_id,
            "title": "Fee Check",
            "fee": "-1.00"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_book_search_filters_by_exact_title() {
    let client = Client::new();
    let marker = format!("Searchable {}", unique_suffix());

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": marker,
            "author": "Test Author",
            "isbn": format!("97{:011}", unique_suffix() % 100_000_000_000),
            "published_date": "1999-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/books/search", BASE_URL))
        .query(&[("title", marker.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["title"], marker.as_str());
}

#[tokio::test]
#[ignore]
async fn test_deleting_customer_cascades_their_records() {
    let client = Client::new();
    let book_id = create_book(&client, 1).await;
    let customer_id = create_customer(&client).await;

    let response = client
        .post(format!("{}/borrow", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer_id": customer_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .delete(format!("{}/customers/{}", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // The record went with the customer; the counter is not restored.
    let book = get_book(&client, book_id).await;
    assert_eq!(book["copies_available"], 0);
}
