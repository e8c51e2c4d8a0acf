//! Public and private service description endpoints

use serde::Serialize;

use crate::api::middleware::RequireUser;
use crate::api::model::PREDICT_PERMISSION;
use crate::api::types::{ApiError, Json};

/// Service description payload
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub title: String,
    pub description: String,
    pub public: bool,
}

impl InfoResponse {
    fn new(public: bool) -> Self {
        Self {
            title: env!("CARGO_PKG_NAME").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
            public,
        }
    }
}

/// Public service description
///
/// GET /info
pub async fn public_info() -> Json<InfoResponse> {
    Json(InfoResponse::new(true))
}

/// Token-gated service description
///
/// GET /private/info
///
/// Requires a valid JWT carrying the predict permission.
pub async fn private_info(RequireUser(auth): RequireUser) -> Result<Json<InfoResponse>, ApiError> {
    auth.require_permission(PREDICT_PERMISSION)?;

    Ok(Json(InfoResponse::new(false)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_public_info_payload() {
        let Json(info) = public_info().await;

        assert_eq!(info.title, "churn-gateway");
        assert!(info.public);
    }
}
