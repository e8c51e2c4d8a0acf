//! Request middleware and extractors

mod user_auth;

pub use user_auth::{extract_jwt_token, AuthContext, RequireUser, ACCESS_TOKEN_COOKIE};
