//! Application state for shared services

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::model::ArtifactStore;
use crate::infrastructure::user::{RegisterRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub artifacts: Arc<ArtifactStore>,
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
        artifacts: Arc<ArtifactStore>,
    ) -> Self {
        Self {
            user_service,
            jwt_service,
            artifacts,
        }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<Option<User>, DomainError>;
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError>;
    async fn activate(&self, email: &str, password: &str) -> Result<User, DomainError>;
    async fn deactivate(&self, email: &str, password: &str) -> Result<User, DomainError>;
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn list(&self, active: Option<bool>) -> Result<Vec<User>, DomainError>;
    async fn count_active(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn register(&self, request: RegisterRequest) -> Result<Option<User>, DomainError> {
        UserService::register(self, request).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        UserService::authenticate(self, email, password).await
    }

    async fn activate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        UserService::activate(self, email, password).await
    }

    async fn deactivate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        UserService::deactivate(self, email, password).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn list(&self, active: Option<bool>) -> Result<Vec<User>, DomainError> {
        UserService::list(self, active).await
    }

    async fn count_active(&self) -> Result<usize, DomainError> {
        UserService::count_active(self).await
    }
}
