//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

use super::entity::User;
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Get a user by their email (for sign-in)
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// List all users (optionally filtered by active flag)
    async fn list(&self, active: Option<bool>) -> Result<Vec<User>, DomainError>;

    /// Count users (optionally filtered by active flag)
    async fn count(&self, active: Option<bool>) -> Result<usize, DomainError>;

    /// Check if an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    /// Record a login for a user
    async fn record_login(&self, id: Uuid) -> Result<(), DomainError>;
}
