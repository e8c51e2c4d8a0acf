//! Churn classification pipeline
//!
//! The deserialized form of the model artifact: a fitted column
//! transformer feeding a fitted MLP classifier. Inference only; the
//! artifact is produced by an offline training job.

mod mlp;
mod transform;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use mlp::{Activation, DenseLayer, MlpClassifier};
pub use transform::{ColumnRole, ColumnTransformer, FeatureValue};

/// Errors raised during inference
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Expected {expected} columns per row, got {actual}")]
    ColumnCount { expected: usize, actual: usize },

    #[error("Column {column}: unexpected value {value}")]
    TypeMismatch { column: usize, value: String },

    #[error("Shape mismatch: {message}")]
    Shape { message: String },
}

/// Fitted preprocessing + classifier pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub transformer: ColumnTransformer,
    pub classifier: MlpClassifier,
}

impl Pipeline {
    /// Class probabilities for each input row, class 0 first
    ///
    /// Returns `[1 - p, p]` per row where `p` is the classifier's
    /// positive-class probability. An empty input yields an empty
    /// output.
    pub fn predict_proba(
        &self,
        rows: &[Vec<FeatureValue>],
    ) -> Result<Vec<[f64; 2]>, PipelineError> {
        let mut output = Vec::with_capacity(rows.len());

        for row in rows {
            let features = self.transformer.transform_row(row)?;
            let p = self.classifier.forward(&features)?;
            output.push([1.0 - p, p]);
        }

        Ok(output)
    }
}
