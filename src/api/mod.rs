//! HTTP API layer

pub mod auth;
pub mod health;
pub mod info;
pub mod middleware;
pub mod model;
pub mod router;
pub mod state;
pub mod types;
pub mod users;

pub use router::{create_router, create_router_with_state};
