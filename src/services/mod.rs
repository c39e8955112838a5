//! Business logic services

pub mod catalog;
pub mod loans;
pub mod queries;
pub mod renewals;

use crate::{config::LoansConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub renewals: renewals::RenewalService,
    pub queries: queries::QueryService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(repository: Repository, loans_config: &LoansConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            renewals: renewals::RenewalService::new(repository.clone(), loans_config),
            queries: queries::QueryService::new(repository),
        }
    }
}
