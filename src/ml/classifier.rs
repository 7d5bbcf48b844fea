//! Classifier artifacts
//!
//! The three ensemble members are fitted externally and persisted as
//! parameter blobs; this module holds their inference-side counterparts.
//! Each artifact exposes exactly one operation: the calibrated probability
//! that a scaled feature vector is AI-generated. Raw decision values are
//! mapped to probabilities by per-classifier Platt scaling fitted together
//! with the model.

use crate::error::DetectError;
use serde::{Deserialize, Serialize};

/// One calibrated probability estimate for the positive (AI) class
///
/// Implementations are immutable after loading and safe to share across
/// concurrent requests.
pub trait ProbabilisticClassifier: Send + Sync {
    /// Estimated probability in [0, 1] that `features` is AI-generated
    ///
    /// `features` must already be standardized by the shared scaler.
    fn predict_proba(&self, features: &[f32]) -> Result<f32, DetectError>;

    /// Stable short name used in logs
    fn name(&self) -> &'static str;

    /// Expected input dimensionality
    fn input_len(&self) -> usize;
}

/// Platt sigmoid calibration over a raw decision value
///
/// `p = 1 / (1 + exp(a * f + b))`. The identity mapping for a classifier
/// whose decision value is already a logit is `a = -1, b = 0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SigmoidCalibration {
    /// Slope term
    pub a: f32,
    /// Offset term
    pub b: f32,
}

impl SigmoidCalibration {
    /// Plain sigmoid over the decision value (`a = -1, b = 0`)
    pub fn identity() -> Self {
        Self { a: -1.0, b: 0.0 }
    }

    /// Map a raw decision value to a calibrated probability
    pub fn apply(&self, decision: f32) -> f32 {
        1.0 / (1.0 + (self.a * decision + self.b).exp())
    }
}

fn check_input_len(expected: usize, got: usize, name: &str) -> Result<(), DetectError> {
    if expected != got {
        return Err(DetectError::Internal(format!(
            "{} expects {} dimensions, got {}",
            name, expected, got
        )));
    }
    Ok(())
}

/// Fitted logistic regression parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    /// Per-dimension weights
    pub weights: Vec<f32>,
    /// Intercept term
    pub bias: f32,
    /// Platt calibration over the linear decision value
    pub calibration: SigmoidCalibration,
}

impl ProbabilisticClassifier for LogisticModel {
    fn predict_proba(&self, features: &[f32]) -> Result<f32, DetectError> {
        check_input_len(self.weights.len(), features.len(), self.name())?;

        let decision: f32 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(&w, &x)| w * x)
            .sum::<f32>()
            + self.bias;

        Ok(self.calibration.apply(decision))
    }

    fn name(&self) -> &'static str {
        "logistic"
    }

    fn input_len(&self) -> usize {
        self.weights.len()
    }
}

/// Fitted RBF-kernel support vector machine parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbfSvmModel {
    /// Expected feature dimensionality
    pub n_features: usize,
    /// Support vectors in the scaled feature space
    pub support_vectors: Vec<Vec<f32>>,
    /// Signed dual coefficients, one per support vector
    pub dual_coefs: Vec<f32>,
    /// RBF kernel width
    pub gamma: f32,
    /// Intercept term
    pub intercept: f32,
    /// Platt calibration over the kernel decision value
    pub calibration: SigmoidCalibration,
}

impl RbfSvmModel {
    fn validate(&self) -> Result<(), DetectError> {
        if self.support_vectors.len() != self.dual_coefs.len() {
            return Err(DetectError::Internal(format!(
                "svm artifact is corrupted: {} support vectors, {} dual coefficients",
                self.support_vectors.len(),
                self.dual_coefs.len()
            )));
        }
        if self.support_vectors.iter().any(|sv| sv.len() != self.n_features) {
            return Err(DetectError::Internal(
                "svm artifact is corrupted: support vector dimensionality mismatch".to_string(),
            ));
        }
        Ok(())
    }
}

impl ProbabilisticClassifier for RbfSvmModel {
    fn predict_proba(&self, features: &[f32]) -> Result<f32, DetectError> {
        check_input_len(self.n_features, features.len(), self.name())?;
        self.validate()?;

        let mut decision = self.intercept;
        for (sv, &coef) in self.support_vectors.iter().zip(self.dual_coefs.iter()) {
            let dist_sq: f32 = sv
                .iter()
                .zip(features.iter())
                .map(|(&a, &b)| {
                    let d = a - b;
                    d * d
                })
                .sum();
            decision += coef * (-self.gamma * dist_sq).exp();
        }

        Ok(self.calibration.apply(decision))
    }

    fn name(&self) -> &'static str {
        "svm"
    }

    fn input_len(&self) -> usize {
        self.n_features
    }
}

/// One node of a fitted decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split: go left if `features[feature] <= threshold`
    Split {
        /// Feature index tested at this node
        feature: usize,
        /// Split threshold
        threshold: f32,
        /// Index of the left child in the node array
        left: usize,
        /// Index of the right child in the node array
        right: usize,
    },
    /// Leaf holding the positive-class fraction of its training samples
    Leaf {
        /// Positive-class fraction in [0, 1]
        probability: f32,
    },
}

/// A single fitted decision tree, nodes stored in one array with the root
/// at index 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Node array; child indices point into this array
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn predict(&self, features: &[f32]) -> Result<f32, DetectError> {
        let mut index = 0usize;
        // A well-formed tree terminates within nodes.len() steps; anything
        // longer means a cycle in a corrupted artifact.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { probability }) => return Ok(*probability),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).ok_or_else(|| {
                        DetectError::Internal(format!(
                            "tree artifact is corrupted: feature index {} out of range",
                            feature
                        ))
                    })?;
                    index = if *value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(DetectError::Internal(format!(
                        "tree artifact is corrupted: node index {} out of range",
                        index
                    )))
                }
            }
        }
        Err(DetectError::Internal(
            "tree artifact is corrupted: traversal did not terminate".to_string(),
        ))
    }
}

/// Fitted bagged decision-tree ensemble parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    /// Expected feature dimensionality
    pub n_features: usize,
    /// Bagged trees; the raw decision value is their mean leaf fraction
    pub trees: Vec<DecisionTree>,
    /// Platt calibration over the mean leaf fraction
    pub calibration: SigmoidCalibration,
}

impl ProbabilisticClassifier for ForestModel {
    fn predict_proba(&self, features: &[f32]) -> Result<f32, DetectError> {
        check_input_len(self.n_features, features.len(), self.name())?;
        if self.trees.is_empty() {
            return Err(DetectError::Internal(
                "forest artifact is corrupted: no trees".to_string(),
            ));
        }

        let mut sum = 0.0f32;
        for tree in &self.trees {
            sum += tree.predict(features)?;
        }
        let decision = sum / self.trees.len() as f32;

        Ok(self.calibration.apply(decision))
    }

    fn name(&self) -> &'static str {
        "forest"
    }

    fn input_len(&self) -> usize {
        self.n_features
    }
}
