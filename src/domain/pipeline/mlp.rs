//! Multi-layer perceptron forward pass
//!
//! The classifier half of the artifact: fitted dense layers applied to
//! the transformed feature vector. Hidden layers use the configured
//! activation (tanh for the shipped churn model); the output layer is a
//! single logistic unit whose value is the positive-class probability.

use serde::{Deserialize, Serialize};

use super::PipelineError;

/// Activation functions supported by the artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Identity,
    Logistic,
    Tanh,
    Relu,
}

impl Activation {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Logistic => 1.0 / (1.0 + (-x).exp()),
            Self::Tanh => x.tanh(),
            Self::Relu => x.max(0.0),
        }
    }
}

/// One fitted dense layer; `weights[input][output]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

impl DenseLayer {
    pub fn input_dim(&self) -> usize {
        self.weights.len()
    }

    pub fn output_dim(&self) -> usize {
        self.biases.len()
    }

    /// Affine transform of `input`, without activation
    fn affine(&self, input: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if input.len() != self.weights.len() {
            return Err(PipelineError::Shape {
                message: format!(
                    "layer expects {} inputs, got {}",
                    self.weights.len(),
                    input.len()
                ),
            });
        }

        let mut output = self.biases.clone();

        for (value, row) in input.iter().zip(&self.weights) {
            if row.len() != output.len() {
                return Err(PipelineError::Shape {
                    message: format!(
                        "weight row has {} outputs, layer has {} biases",
                        row.len(),
                        output.len()
                    ),
                });
            }

            for (acc, weight) in output.iter_mut().zip(row) {
                *acc += value * weight;
            }
        }

        Ok(output)
    }
}

/// Fitted MLP binary classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlpClassifier {
    pub layers: Vec<DenseLayer>,
    pub hidden_activation: Activation,
    pub out_activation: Activation,
}

impl MlpClassifier {
    /// Forward pass yielding the positive-class probability
    pub fn forward(&self, features: &[f64]) -> Result<f64, PipelineError> {
        if self.layers.is_empty() {
            return Err(PipelineError::Shape {
                message: "classifier has no layers".to_string(),
            });
        }

        let mut current = features.to_vec();
        let last = self.layers.len() - 1;

        for (index, layer) in self.layers.iter().enumerate() {
            let activation = if index == last {
                self.out_activation
            } else {
                self.hidden_activation
            };

            current = layer.affine(&current)?;

            for value in current.iter_mut() {
                *value = activation.apply(*value);
            }
        }

        if current.len() != 1 {
            return Err(PipelineError::Shape {
                message: format!("output layer produced {} values, expected 1", current.len()),
            });
        }

        Ok(current[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(weights: Vec<Vec<f64>>, biases: Vec<f64>) -> DenseLayer {
        DenseLayer { weights, biases }
    }

    #[test]
    fn test_activations() {
        assert_eq!(Activation::Identity.apply(-2.0), -2.0);
        assert_eq!(Activation::Relu.apply(-2.0), 0.0);
        assert_eq!(Activation::Relu.apply(2.0), 2.0);
        assert!((Activation::Logistic.apply(0.0) - 0.5).abs() < 1e-12);
        assert!((Activation::Tanh.apply(0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_single_logistic_unit() {
        let mlp = MlpClassifier {
            layers: vec![layer(vec![vec![1.0], vec![1.0]], vec![0.0])],
            hidden_activation: Activation::Tanh,
            out_activation: Activation::Logistic,
        };

        // Zero input through a zero-bias logistic unit is exactly 0.5
        let p = mlp.forward(&[0.0, 0.0]).unwrap();
        assert!((p - 0.5).abs() < 1e-12);

        // Large positive pre-activation saturates towards 1
        let p = mlp.forward(&[10.0, 10.0]).unwrap();
        assert!(p > 0.99);
    }

    #[test]
    fn test_hidden_layer_uses_tanh() {
        // One tanh hidden unit feeding one logistic output unit.
        // forward([1]) = logistic(tanh(1))
        let mlp = MlpClassifier {
            layers: vec![
                layer(vec![vec![1.0]], vec![0.0]),
                layer(vec![vec![1.0]], vec![0.0]),
            ],
            hidden_activation: Activation::Tanh,
            out_activation: Activation::Logistic,
        };

        let expected = 1.0 / (1.0 + (-(1.0f64.tanh())).exp());
        let p = mlp.forward(&[1.0]).unwrap();
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_input_dim_mismatch() {
        let mlp = MlpClassifier {
            layers: vec![layer(vec![vec![1.0], vec![1.0]], vec![0.0])],
            hidden_activation: Activation::Tanh,
            out_activation: Activation::Logistic,
        };

        let err = mlp.forward(&[1.0]).unwrap_err();
        assert!(matches!(err, PipelineError::Shape { .. }));
    }

    #[test]
    fn test_ragged_weights_rejected() {
        let mlp = MlpClassifier {
            layers: vec![layer(vec![vec![1.0, 2.0]], vec![0.0])],
            hidden_activation: Activation::Tanh,
            out_activation: Activation::Logistic,
        };

        let err = mlp.forward(&[1.0]).unwrap_err();
        assert!(matches!(err, PipelineError::Shape { .. }));
    }

    #[test]
    fn test_empty_classifier_rejected() {
        let mlp = MlpClassifier {
            layers: vec![],
            hidden_activation: Activation::Tanh,
            out_activation: Activation::Logistic,
        };

        let err = mlp.forward(&[]).unwrap_err();
        assert!(matches!(err, PipelineError::Shape { .. }));
    }

    #[test]
    fn test_wide_output_rejected() {
        let mlp = MlpClassifier {
            layers: vec![layer(vec![vec![1.0, 1.0]], vec![0.0, 0.0])],
            hidden_activation: Activation::Tanh,
            out_activation: Activation::Logistic,
        };

        let err = mlp.forward(&[1.0]).unwrap_err();
        assert!(matches!(err, PipelineError::Shape { .. }));
    }
}
