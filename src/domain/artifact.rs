//! Model artifact types
//!
//! The on-disk form of a trained model: pipeline weights plus the
//! metadata recorded by the offline training job, and the sidecar of
//! business parameters consumed by the loss endpoint.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pipeline::Pipeline;

/// Metadata recorded when the artifact was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Artifact identifier assigned at dump time
    pub id: Uuid,
    /// When the model was trained
    pub timestamp: DateTime<Utc>,
    /// Training hyperparameters
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
    /// Evaluation metrics on the held-out split
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
    /// Free-form fields (author, description, version, tags)
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// The full artifact document stored at `model.artifact_path`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub meta: ArtifactMeta,
    pub pipeline: Pipeline,
}

/// Business parameters sidecar consumed by the loss formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessParams {
    pub agents_per_client: f64,
    pub operational_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pipeline::test_fixtures::tiny_pipeline;

    #[test]
    fn test_artifact_serde_round_trip() {
        let artifact = ModelArtifact {
            meta: ArtifactMeta {
                id: Uuid::new_v4(),
                timestamp: Utc::now(),
                params: HashMap::from([(
                    "solver".to_string(),
                    serde_json::Value::String("adam".to_string()),
                )]),
                metrics: HashMap::from([("accuracy".to_string(), 0.86)]),
                extra: HashMap::from([(
                    "model_version".to_string(),
                    serde_json::Value::String("1.0.0".to_string()),
                )]),
            },
            pipeline: tiny_pipeline(),
        };

        let json = serde_json::to_string_pretty(&artifact).unwrap();
        let back: ModelArtifact = serde_json::from_str(&json).unwrap();

        assert_eq!(back.meta.id, artifact.meta.id);
        assert_eq!(back.meta.metrics["accuracy"], 0.86);
    }

    #[test]
    fn test_meta_sections_default_to_empty() {
        let json = r#"{"id":"e9d4a470-1eb2-423e-8fb3-eaf236158ab3","timestamp":"2024-01-01T00:00:00Z"}"#;
        let meta: ArtifactMeta = serde_json::from_str(json).unwrap();

        assert!(meta.params.is_empty());
        assert!(meta.metrics.is_empty());
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_business_params_deserialization() {
        let params: BusinessParams =
            serde_json::from_str(r#"{"agents_per_client": 0.3, "operational_cost": 1000.0}"#)
                .unwrap();

        assert_eq!(
            params,
            BusinessParams {
                agents_per_client: 0.3,
                operational_cost: 1000.0
            }
        );
    }
}
