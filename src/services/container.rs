//! Service Container - wires services to a shared Unit of Work.

use std::sync::Arc;

use super::{AuthService, Authenticator, TodoManager, TodoService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get todo service
    fn todos(&self) -> Arc<dyn TodoService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    todo_service: Arc<dyn TodoService>,
}

impl Services {
    /// Create a container from already-built services
    pub fn new(auth_service: Arc<dyn AuthService>, todo_service: Arc<dyn TodoService>) -> Self {
        Self {
            auth_service,
            todo_service,
        }
    }

    /// Build every service on top of one database connection pool
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let todo_service = Arc::new(TodoManager::new(uow));

        Self::new(auth_service, todo_service)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn todos(&self) -> Arc<dyn TodoService> {
        self.todo_service.clone()
    }
}
