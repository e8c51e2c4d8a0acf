//! User infrastructure module
//!
//! Implementations for user accounts: password hashing (Argon2 and the
//! legacy SHA-512 scheme), Postgres and in-memory repositories, and the
//! user service.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{hasher_from_config, Argon2Hasher, PasswordHasher, Sha512Hasher};
pub use postgres_repository::{create_schema, PostgresUserRepository};
pub use repository::InMemoryUserRepository;
pub use service::{RegisterRequest, UserService};
