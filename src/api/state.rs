//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, ServiceContainer, Services, TodoService};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Todo service
    pub todo_service: Arc<dyn TodoService>,
    /// Database connection, used by the health probe
    pub database: Arc<Database>,
}

impl AppState {
    /// Build the default service graph on top of `database`.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.connection().clone(), config);
        Self::new(&services, database)
    }

    /// Build state from any service container (lets tests swap services).
    pub fn new(services: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: services.auth(),
            todo_service: services.todos(),
            database,
        }
    }
}
