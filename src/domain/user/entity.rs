//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account entity
///
/// Accounts are created inactive and must be activated before they can
/// sign in. The email is the login identity and is unique across the
/// `users` table; uniqueness is enforced by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: Uuid,
    /// First name
    name: String,
    /// Surname
    surname: String,
    /// Email address used for sign-in, lowercase-normalized
    email: String,
    /// Password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Whether the account has been activated
    active: bool,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
    /// Last login timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new inactive user
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            surname: surname.into(),
            email: email.into().to_lowercase(),
            password_hash: password_hash.into(),
            active: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Reconstruct a user from stored fields (repository use)
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        name: String,
        surname: String,
        email: String,
        password_hash: String,
        active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        last_login_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            surname,
            email,
            password_hash,
            active,
            created_at,
            updated_at,
            last_login_at,
        }
    }

    // Getters

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    // Mutators

    /// Activate the account. No-op if already active.
    pub fn activate(&mut self) {
        if !self.active {
            self.active = true;
            self.touch();
        }
    }

    /// Deactivate the account. No-op if already inactive.
    pub fn deactivate(&mut self) {
        if self.active {
            self.active = false;
            self.touch();
        }
    }

    /// Update the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Record a login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
