//! Business logic services

pub mod auth;
pub mod catalog;
pub mod loans;
pub mod redis;
pub mod renewal;

use std::sync::Arc;

use crate::{
    clock::Clock,
    config::{AuthConfig, CatalogConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub renewal: renewal::RenewalService,
    pub redis: redis::RedisService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        catalog_config: CatalogConfig,
        redis_service: redis::RedisService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let permissions = Arc::new(repository.users.clone());
        let copies = Arc::new(repository.book_instances.clone());
        let page_size = catalog_config.page_size;

        Self {
            auth: auth::AuthService::new(repository.users.clone(), permissions.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone(), page_size),
            loans: loans::LoansService::new(repository.clone(), clock.clone(), page_size),
            renewal: renewal::RenewalService::new(copies, permissions, clock),
            redis: redis_service,
            repository,
        }
    }

    /// Database connectivity check for readiness probes
    pub async fn ping_database(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
