use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::info;
use super::model;
use super::state::AppState;
use super::users;

/// Create a minimal router without state (for testing/backward compatibility)
/// Note: /ready endpoint is not available without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Service description
        .route("/info", get(info::public_info))
        .route("/private/info", get(info::private_info))
        // Authentication endpoints (no auth required for login)
        .nest("/auth", auth::create_auth_router())
        // User account lifecycle
        .nest("/users", users::create_users_router())
        // Index routes with a trailing slash (matchit 0.8 no longer folds
        // a nested `/` route onto the `/prefix/` form, so wire it explicitly)
        .route("/users/", axum::routing::post(users::register))
        // Model serving
        .nest("/model", model::create_model_router())
        .route("/model/", axum::routing::get(model::metadata))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_state;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    fn register_body(email: &str) -> serde_json::Value {
        serde_json::json!({
            "name": "Ada",
            "surname": "Lovelace",
            "email": email,
            "password": "secure_password123"
        })
    }

    fn credentials(email: &str, password: &str) -> serde_json::Value {
        serde_json::json!({ "email": email, "password": password })
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_router_with_state(test_state::build());

        let (status, body) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, _) = send(&app, "GET", "/live", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_public_info_needs_no_token() {
        let app = create_router_with_state(test_state::build());

        let (status, body) = send(&app, "GET", "/info", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["public"], true);

        let (status, _) = send(&app, "GET", "/private/info", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_lifecycle() {
        let app = create_router_with_state(test_state::build());

        // Register: 200, account starts inactive
        let (status, _) = send(
            &app,
            "POST",
            "/users/",
            None,
            Some(register_body("ada@example.com")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Duplicate registration is still 200
        let (status, _) = send(
            &app,
            "POST",
            "/users/",
            None,
            Some(register_body("ada@example.com")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Signin before activation: 400
        let (status, _) = send(
            &app,
            "POST",
            "/users/signin",
            None,
            Some(credentials("ada@example.com", "secure_password123")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Activate, then signin succeeds
        let (status, _) = send(
            &app,
            "POST",
            "/users/activate",
            None,
            Some(credentials("ada@example.com", "secure_password123")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "POST",
            "/users/signin",
            None,
            Some(credentials("ada@example.com", "secure_password123")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["active"], true);

        // Deactivate puts signin back to 400
        let (status, _) = send(
            &app,
            "POST",
            "/users/deactivate",
            None,
            Some(credentials("ada@example.com", "secure_password123")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            "POST",
            "/users/signin",
            None,
            Some(credentials("ada@example.com", "secure_password123")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_signin_error_statuses() {
        let app = create_router_with_state(test_state::build());

        // Unknown email: 404
        let (status, _) = send(
            &app,
            "POST",
            "/users/signin",
            None,
            Some(credentials("nobody@example.com", "secure_password123")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Wrong password: 401
        send(
            &app,
            "POST",
            "/users/",
            None,
            Some(register_body("ada@example.com")),
        )
        .await;

        let (status, _) = send(
            &app,
            "POST",
            "/users/signin",
            None,
            Some(credentials("ada@example.com", "wrong_password")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    async fn register_activate_login(app: &Router, email: &str) -> String {
        send(app, "POST", "/users/", None, Some(register_body(email))).await;
        send(
            app,
            "POST",
            "/users/activate",
            None,
            Some(credentials(email, "secure_password123")),
        )
        .await;

        let (status, body) = send(
            app,
            "POST",
            "/auth/login",
            None,
            Some(credentials(email, "secure_password123")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_login_and_me() {
        let app = create_router_with_state(test_state::build());
        let token = register_activate_login(&app, "ada@example.com").await;

        let (status, body) = send(&app, "GET", "/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "ada@example.com");

        let (status, body) = send(&app, "GET", "/private/info", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["public"], false);
    }

    #[tokio::test]
    async fn test_login_rejects_inactive_account() {
        let app = create_router_with_state(test_state::build());

        send(
            &app,
            "POST",
            "/users/",
            None,
            Some(register_body("ada@example.com")),
        )
        .await;

        let (status, _) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(credentials("ada@example.com", "secure_password123")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_model_routes_require_token() {
        let app = create_router_with_state(test_state::build());

        let (status, _) = send(&app, "GET", "/model/", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            "POST",
            "/model/predict",
            None,
            Some(serde_json::json!({ "input": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_model_metadata_and_predict() {
        let app = create_router_with_state(test_state::build());
        let token = register_activate_login(&app, "ada@example.com").await;

        let (status, body) = send(&app, "GET", "/model/", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metrics"]["accuracy"], 0.86);

        // The test pipeline has 3 raw columns: dropped id, numeric, category
        let (status, body) = send(
            &app,
            "POST",
            "/model/predict",
            Some(&token),
            Some(serde_json::json!({ "input": [[1, 0.0, "a"]] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let row = body["output"][0].as_array().unwrap();
        assert!((row[0].as_f64().unwrap() - 0.5).abs() < 1e-9);
        assert!((row[1].as_f64().unwrap() - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_model_predict_bad_arity() {
        let app = create_router_with_state(test_state::build());
        let token = register_activate_login(&app, "ada@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/model/predict",
            Some(&token),
            Some(serde_json::json!({ "input": [[1, 2]] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request");
    }

    #[tokio::test]
    async fn test_cookie_token_accepted() {
        let app = create_router_with_state(test_state::build());
        let token = register_activate_login(&app, "ada@example.com").await;

        let request = Request::builder()
            .method("GET")
            .uri("/auth/me")
            .header(header::COOKIE, format!("access_token={}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
