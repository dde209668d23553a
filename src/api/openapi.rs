//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{book_requests, books, circulation, customers, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblio API",
        version = "1.0.0",
        description = "Library lending backend REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::search_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        customers::get_borrowed_books,
        // Circulation
        circulation::borrow_book,
        circulation::return_book,
        circulation::list_borrow_records,
        circulation::list_overdue,
        // Book requests
        book_requests::list_book_requests,
        book_requests::create_book_request,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::CreateCustomer,
            crate::models::customer::UpdateCustomer,
            // Circulation
            crate::models::borrow_record::BorrowRecord,
            crate::models::borrow_record::BorrowBook,
            crate::models::borrow_record::ReturnBook,
            circulation::CirculationResponse,
            // Book requests
            crate::models::book_request::BookRequest,
            crate::models::book_request::CreateBookRequest,
            book_requests::BookRequestResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "customers", description = "Customer management"),
        (name = "circulation", description = "Borrow and return operations"),
        (name = "book-requests", description = "Book acquisition requests")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
