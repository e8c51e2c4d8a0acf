//! User account API endpoints
//!
//! Registration, sign-in and activation lifecycle over the users table.
//! Registration returns 200 whether or not the email was new.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::User;
use crate::infrastructure::user::RegisterRequest;

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/signin", post(signin))
        .route("/activate", post(activate))
        .route("/deactivate", post(deactivate))
        .route("/active/count", get(active_count))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

/// Credentials request for signin/activate/deactivate
#[derive(Debug, Deserialize)]
pub struct CredentialsBody {
    pub email: String,
    pub password: String,
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub active: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            surname: user.surname().to_string(),
            email: user.email().to_string(),
            active: user.is_active(),
            created_at: user.created_at().to_rfc3339(),
            last_login_at: user.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// Count of activated accounts
#[derive(Debug, Serialize)]
pub struct ActiveCountResponse {
    pub active: usize,
}

/// Register a new user
///
/// POST /users
///
/// Creates an inactive account. Returns 200 even when the email is
/// already registered.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .register(RegisterRequest {
            name: body.name,
            surname: body.surname,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(StatusCode::OK)
}

/// Sign in with email and password
///
/// POST /users/signin
///
/// Returns the account record. 404 for an unknown email, 401 for a
/// wrong password, 400 for an account that has not been activated.
pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&body.email, &body.password)
        .await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Activate an account
///
/// POST /users/activate
///
/// Requires the account credentials; idempotent.
pub async fn activate(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .activate(&body.email, &body.password)
        .await?;

    Ok(StatusCode::OK)
}

/// Deactivate an account
///
/// POST /users/deactivate
///
/// Requires the account credentials; idempotent.
pub async fn deactivate(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .deactivate(&body.email, &body.password)
        .await?;

    Ok(StatusCode::OK)
}

/// Count of activated accounts
///
/// GET /users/active/count
///
/// Requires a valid JWT.
pub async fn active_count(
    _auth: RequireUser,
    State(state): State<AppState>,
) -> Result<Json<ActiveCountResponse>, ApiError> {
    let active = state.user_service.count_active().await?;

    Ok(Json(ActiveCountResponse { active }))
}
