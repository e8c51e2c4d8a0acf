//! Fitted preprocessing transforms applied ahead of the classifier
//!
//! The artifact stores, per raw input column, the statistics fitted
//! offline: the imputation fill value, scaling parameters for numeric
//! columns, and the category vocabulary for categorical columns. The
//! transformed feature vector is all numeric features in column order
//! followed by all categorical one-hot blocks in column order.

use serde::{Deserialize, Serialize};

use super::PipelineError;

/// One cell of the raw input matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
    Null,
}

impl FeatureValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the cell, if it holds a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{:?}", s),
            Self::Null => write!(f, "null"),
        }
    }
}

/// Fitted role of one raw input column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ColumnRole {
    /// Impute nulls with `fill` (the fitted median), then standard-scale
    Numeric { fill: f64, mean: f64, std: f64 },
    /// Impute nulls with `fill`, then one-hot encode against `categories`;
    /// unknown categories encode as all zeros
    Categorical { fill: String, categories: Vec<String> },
    /// Present in the input but not used by the model
    Dropped,
}

/// Column-wise preprocessor over the raw input matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTransformer {
    pub columns: Vec<ColumnRole>,
}

impl ColumnTransformer {
    /// Number of raw input columns expected per row
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Width of the transformed feature vector
    pub fn n_features(&self) -> usize {
        self.columns
            .iter()
            .map(|c| match c {
                ColumnRole::Numeric { .. } => 1,
                ColumnRole::Categorical { categories, .. } => categories.len(),
                ColumnRole::Dropped => 0,
            })
            .sum()
    }

    /// Transform one raw row into the model's feature space
    pub fn transform_row(&self, row: &[FeatureValue]) -> Result<Vec<f64>, PipelineError> {
        if row.len() != self.columns.len() {
            return Err(PipelineError::ColumnCount {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        let mut features = Vec::with_capacity(self.n_features());

        // Numeric block first, matching the fitted transformer ordering
        for (index, (role, value)) in self.columns.iter().zip(row).enumerate() {
            if let ColumnRole::Numeric { fill, mean, std } = role {
                let raw = match value {
                    FeatureValue::Number(v) => *v,
                    FeatureValue::Null => *fill,
                    FeatureValue::Text(_) => {
                        return Err(PipelineError::TypeMismatch {
                            column: index,
                            value: value.to_string(),
                        });
                    }
                };

                let scaled = if *std == 0.0 { 0.0 } else { (raw - mean) / std };
                features.push(scaled);
            }
        }

        // Then the categorical one-hot blocks
        for (index, (role, value)) in self.columns.iter().zip(row).enumerate() {
            if let ColumnRole::Categorical { fill, categories } = role {
                let label = match value {
                    FeatureValue::Text(s) => s.as_str(),
                    FeatureValue::Null => fill.as_str(),
                    FeatureValue::Number(_) => {
                        return Err(PipelineError::TypeMismatch {
                            column: index,
                            value: value.to_string(),
                        });
                    }
                };

                let hit = categories.iter().position(|c| c == label);

                for position in 0..categories.len() {
                    features.push(if hit == Some(position) { 1.0 } else { 0.0 });
                }
            }
        }

        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transformer() -> ColumnTransformer {
        ColumnTransformer {
            columns: vec![
                ColumnRole::Dropped,
                ColumnRole::Numeric {
                    fill: 10.0,
                    mean: 10.0,
                    std: 5.0,
                },
                ColumnRole::Categorical {
                    fill: "missing".to_string(),
                    categories: vec![
                        "France".to_string(),
                        "Germany".to_string(),
                        "missing".to_string(),
                    ],
                },
            ],
        }
    }

    fn num(v: f64) -> FeatureValue {
        FeatureValue::Number(v)
    }

    fn text(s: &str) -> FeatureValue {
        FeatureValue::Text(s.to_string())
    }

    #[test]
    fn test_feature_widths() {
        let t = transformer();
        assert_eq!(t.n_columns(), 3);
        assert_eq!(t.n_features(), 4); // 1 numeric + 3 one-hot
    }

    #[test]
    fn test_transform_row() {
        let t = transformer();
        let features = t
            .transform_row(&[num(1.0), num(20.0), text("Germany")])
            .unwrap();

        assert_eq!(features, vec![2.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_null_imputation() {
        let t = transformer();
        let features = t
            .transform_row(&[FeatureValue::Null, FeatureValue::Null, FeatureValue::Null])
            .unwrap();

        // Numeric null imputes to the fitted median (scales to zero here);
        // categorical null imputes to the fill label
        assert_eq!(features, vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_category_encodes_as_zeros() {
        let t = transformer();
        let features = t
            .transform_row(&[num(1.0), num(10.0), text("Spain")])
            .unwrap();

        assert_eq!(features, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_std_scales_to_zero() {
        let t = ColumnTransformer {
            columns: vec![ColumnRole::Numeric {
                fill: 0.0,
                mean: 3.0,
                std: 0.0,
            }],
        };

        assert_eq!(t.transform_row(&[num(42.0)]).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_wrong_arity() {
        let t = transformer();
        let err = t.transform_row(&[num(1.0)]).unwrap_err();

        assert_eq!(
            err,
            PipelineError::ColumnCount {
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn test_text_in_numeric_column() {
        let t = transformer();
        let err = t
            .transform_row(&[num(1.0), text("oops"), text("France")])
            .unwrap_err();

        assert!(matches!(err, PipelineError::TypeMismatch { column: 1, .. }));
    }

    #[test]
    fn test_number_in_categorical_column() {
        let t = transformer();
        let err = t
            .transform_row(&[num(1.0), num(10.0), num(7.0)])
            .unwrap_err();

        assert!(matches!(err, PipelineError::TypeMismatch { column: 2, .. }));
    }

    #[test]
    fn test_feature_value_deserialization() {
        let row: Vec<FeatureValue> = serde_json::from_str(r#"[619, "France", null]"#).unwrap();

        assert_eq!(
            row,
            vec![num(619.0), text("France"), FeatureValue::Null]
        );
    }
}
