//! User authentication middleware using JWT tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;
use crate::infrastructure::auth::JwtClaims;

/// Cookie carrying the access token when no Authorization header is sent
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authenticated request context: the user plus the token claims
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    pub claims: JwtClaims,
}

impl AuthContext {
    /// Require a permission from the token, 403 otherwise
    pub fn require_permission(&self, permission: &str) -> Result<(), ApiError> {
        if self.claims.has_permission(permission) {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "Token lacks the '{}' permission",
                permission
            )))
        }
    }
}

/// Extractor that requires a valid JWT token
///
/// The token is read from the `Authorization: Bearer <token>` header,
/// falling back to the `access_token` cookie.
#[derive(Debug, Clone)]
pub struct RequireUser(pub AuthContext);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_token(&parts.headers)?;

        debug!("Validating JWT token");

        let claims = state.jwt_service.validate(&token).map_err(ApiError::from)?;

        let user_id = claims
            .user_id()
            .parse()
            .map_err(|_| ApiError::unauthorized("Invalid subject in token"))?;

        let user = state
            .user_service
            .get(user_id)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?
            .ok_or_else(|| ApiError::unauthorized("User not found"))?;

        if !user.is_active() {
            return Err(ApiError::unauthorized("User account is deactivated"));
        }

        Ok(RequireUser(AuthContext { user, claims }))
    }
}

/// Extract a JWT token from the Authorization header or the access cookie
pub fn extract_jwt_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    if let Some(token) = extract_cookie(headers, ACCESS_TOKEN_COOKIE) {
        return Ok(token);
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a JWT via 'Authorization: Bearer <token>' \
         or the 'access_token' cookie",
    ))
}

/// Find a cookie value in the Cookie header(s)
fn extract_cookie(headers: &axum::http::HeaderMap, name: &str) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(cookies) = value.to_str() else {
            continue;
        };

        for pair in cookies.split(';') {
            let mut parts = pair.trim().splitn(2, '=');

            if parts.next() == Some(name) {
                if let Some(token) = parts.next() {
                    if !token.is_empty() {
                        return Some(token.to_string());
                    }
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer eyJhbGciOiJIUzI1NiJ9.test".parse().unwrap(),
        );

        let result = extract_jwt_token(&headers);
        assert_eq!(result.unwrap(), "eyJhbGciOiJIUzI1NiJ9.test");
    }

    #[test]
    fn test_missing_token() {
        let headers = HeaderMap::new();

        let err = extract_jwt_token(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_auth_scheme_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        assert!(extract_jwt_token(&headers).is_err());
    }

    #[test]
    fn test_cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; access_token=tok123; lang=en".parse().unwrap(),
        );

        let result = extract_jwt_token(&headers);
        assert_eq!(result.unwrap(), "tok123");
    }

    #[test]
    fn test_header_takes_precedence_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer from-header".parse().unwrap());
        headers.insert(header::COOKIE, "access_token=from-cookie".parse().unwrap());

        assert_eq!(extract_jwt_token(&headers).unwrap(), "from-header");
    }

    #[test]
    fn test_empty_cookie_value_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "access_token=".parse().unwrap());

        assert!(extract_jwt_token(&headers).is_err());
    }

    #[test]
    fn test_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   token-with-spaces   ".parse().unwrap(),
        );

        assert_eq!(extract_jwt_token(&headers).unwrap(), "token-with-spaces");
    }
}
