//! Model artifact loading
//!
//! Reads the serialized pipeline artifact and the business-parameter
//! sidecar from disk at startup. Both documents are immutable for the
//! lifetime of the process.

use std::path::Path;

use crate::domain::artifact::{ArtifactMeta, BusinessParams, ModelArtifact};
use crate::domain::pipeline::Pipeline;
use crate::domain::DomainError;

/// Loaded artifact pair shared through the application state
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifact: ModelArtifact,
    params: BusinessParams,
}

impl ArtifactStore {
    /// Load the artifact and its sidecar from disk
    pub fn load(
        artifact_path: impl AsRef<Path>,
        params_path: impl AsRef<Path>,
    ) -> Result<Self, DomainError> {
        let artifact = read_json::<ModelArtifact>(artifact_path.as_ref())?;
        let params = read_json::<BusinessParams>(params_path.as_ref())?;

        Ok(Self { artifact, params })
    }

    /// Build a store from already-deserialized parts (tests, tooling)
    pub fn from_parts(artifact: ModelArtifact, params: BusinessParams) -> Self {
        Self { artifact, params }
    }

    pub fn meta(&self) -> &ArtifactMeta {
        &self.artifact.meta
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.artifact.pipeline
    }

    pub fn params(&self) -> BusinessParams {
        self.params
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        DomainError::artifact(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        DomainError::artifact(format!("Failed to parse {}: {}", path.display(), e))
    })
}
