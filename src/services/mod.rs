//! Business logic services

pub mod catalog;
pub mod circulation;
pub mod customers;
pub mod requests;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub customers: customers::CustomersService,
    pub circulation: circulation::CirculationService,
    pub requests: requests::RequestsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            circulation: circulation::CirculationService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            repository,
        }
    }

    /// Verify the database answers; readiness depends on it
    pub async fn ping_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
