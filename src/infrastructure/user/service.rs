//! User service for registration, sign-in and account lifecycle

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::user::{
    validate_email, validate_name, validate_password, User, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

/// User service over a repository and a password hasher
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user
    ///
    /// The account is created inactive. Registering an email that is
    /// already taken is a silent no-op returning `Ok(None)`.
    pub async fn register(&self, request: RegisterRequest) -> Result<Option<User>, DomainError> {
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_name(&request.surname).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let email = request.email.to_lowercase();

        if self.repository.email_exists(&email).await? {
            return Ok(None);
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(&request.name, &request.surname, email, password_hash);

        self.repository.create(user).await.map(Some)
    }

    /// Authenticate a user with email and password
    ///
    /// Errors distinguish the failure: `NotFound` for an unknown email,
    /// `Credential` for a wrong password, `Inactive` for an account
    /// that has not been activated yet.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self.verify_credentials(email, password).await?;

        if !user.is_active() {
            return Err(DomainError::inactive(
                "User must be activated via /users/activate",
            ));
        }

        self.repository.record_login(user.id()).await?;

        // Re-fetch to pick up the recorded login timestamp
        self.repository
            .get(user.id())
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user.id())))
    }

    /// Activate an account. Idempotent once the credentials check out.
    pub async fn activate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let mut user = self.verify_credentials(email, password).await?;

        if !user.is_active() {
            user.activate();
            user = self.repository.update(&user).await?;
        }

        Ok(user)
    }

    /// Deactivate an account. Idempotent once the credentials check out.
    pub async fn deactivate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let mut user = self.verify_credentials(email, password).await?;

        if user.is_active() {
            user.deactivate();
            user = self.repository.update(&user).await?;
        }

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// List users, optionally filtered by the active flag
    pub async fn list(&self, active: Option<bool>) -> Result<Vec<User>, DomainError> {
        self.repository.list(active).await
    }

    /// Count activated accounts
    pub async fn count_active(&self) -> Result<usize, DomainError> {
        self.repository.count(Some(true)).await
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", email)))?;

        if !self.hasher.verify(password, user.password_hash()) {
            return Err(DomainError::credential("Invalid email or password"));
        }

        Ok(user)
    }
}
