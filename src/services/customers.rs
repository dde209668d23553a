//! Customer management service

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, CustomerQuery, UpdateCustomer},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List customers
    pub async fn list_customers(&self, query: &CustomerQuery) -> AppResult<(Vec<Customer>, i64)> {
        self.repository.customers.list(query).await
    }

    /// Get customer by ID
    pub async fn get_customer(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await
    }

    /// Create a new customer
    pub async fn create_customer(&self, customer: CreateCustomer) -> AppResult<Customer> {
        // Email is unique across customers
        if self
            .repository
            .customers
            .email_exists(&customer.email, None)
            .await?
        {
            return Err(AppError::Conflict(
                "A customer with this email already exists".to_string(),
            ));
        }

        self.repository.customers.create(&customer).await
    }

    /// Update an existing customer
    pub async fn update_customer(&self, id: i32, customer: UpdateCustomer) -> AppResult<Customer> {
        // Check if customer exists
        self.repository.customers.get_by_id(id).await?;

        if let Some(ref email) = customer.email {
            if self
                .repository
                .customers
                .email_exists(email, Some(id))
                .await?
            {
                return Err(AppError::Conflict(
                    "A customer with this email already exists".to_string(),
                ));
            }
        }

        self.repository.customers.update(id, &customer).await
    }

    /// Delete a customer; their borrow records and requests go with them
    pub async fn delete_customer(&self, id: i32) -> AppResult<()> {
        self.repository.customers.delete(id).await
    }
}
