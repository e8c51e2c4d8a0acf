//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    /// Index for email -> user ID lookup
    email_index: Arc<RwLock<HashMap<String, Uuid>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut users_map = HashMap::new();
        let mut email_map = HashMap::new();

        for user in users {
            email_map.insert(user.email().to_string(), user.id());
            users_map.insert(user.id(), user);
        }

        Self {
            users: Arc::new(RwLock::new(users_map)),
            email_index: Arc::new(RwLock::new(email_map)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.to_lowercase();
        let index = self.email_index.read().await;

        match index.get(&email) {
            Some(id) => {
                let users = self.users.read().await;
                Ok(users.get(id).cloned())
            }
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut index = self.email_index.write().await;

        if index.contains_key(user.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                user.email()
            )));
        }

        if users.contains_key(&user.id()) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                user.id()
            )));
        }

        index.insert(user.email().to_string(), user.id());
        users.insert(user.id(), user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut index = self.email_index.write().await;

        let existing = users.get(&user.id()).ok_or_else(|| {
            DomainError::not_found(format!("User '{}' not found", user.id()))
        })?;

        if existing.email() != user.email() {
            if index.contains_key(user.email()) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' already registered",
                    user.email()
                )));
            }
            index.remove(existing.email());
            index.insert(user.email().to_string(), user.id());
        }

        users.insert(user.id(), user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let mut index = self.email_index.write().await;

        match users.remove(&id) {
            Some(user) => {
                index.remove(user.email());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, active: Option<bool>) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users
            .values()
            .filter(|u| active.is_none_or(|a| u.is_active() == a))
            .cloned()
            .collect();

        result.sort_by_key(|u| u.created_at());

        Ok(result)
    }

    async fn count(&self, active: Option<bool>) -> Result<usize, DomainError> {
        let users = self.users.read().await;

        Ok(users
            .values()
            .filter(|u| active.is_none_or(|a| u.is_active() == a))
            .count())
    }

    async fn record_login(&self, id: Uuid) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        user.record_login();

        Ok(())
    }
}
