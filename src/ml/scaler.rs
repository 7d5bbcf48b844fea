//! Feature standardization
//!
//! Per-dimension mean/variance standardization. The parameters are fitted
//! once over the training feature matrix and reused unchanged at
//! inference; all three classifiers share the same fitted scaler.

use crate::error::DetectError;
use serde::{Deserialize, Serialize};

/// Guard against division by a degenerate standard deviation
const EPSILON: f32 = 1e-10;

/// Fitted per-dimension standardization parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-dimension mean over the training matrix
    pub mean: Vec<f32>,

    /// Per-dimension population standard deviation over the training matrix
    pub std: Vec<f32>,
}

impl StandardScaler {
    /// Fit scaler parameters over a feature matrix (rows are samples)
    ///
    /// # Errors
    ///
    /// Returns `DetectError::Internal` if the matrix is empty or ragged.
    pub fn fit(matrix: &[Vec<f32>]) -> Result<Self, DetectError> {
        let first = matrix
            .first()
            .ok_or_else(|| DetectError::Internal("cannot fit scaler on empty matrix".to_string()))?;
        let dims = first.len();
        if matrix.iter().any(|row| row.len() != dims) {
            return Err(DetectError::Internal(
                "ragged feature matrix".to_string(),
            ));
        }

        let n = matrix.len() as f64;
        let mut mean = Vec::with_capacity(dims);
        let mut std = Vec::with_capacity(dims);

        for d in 0..dims {
            let m: f64 = matrix.iter().map(|row| row[d] as f64).sum::<f64>() / n;
            let var: f64 = matrix
                .iter()
                .map(|row| {
                    let diff = row[d] as f64 - m;
                    diff * diff
                })
                .sum::<f64>()
                / n;
            mean.push(m as f32);
            std.push(var.sqrt() as f32);
        }

        log::debug!("Fitted scaler over {} samples x {} dims", matrix.len(), dims);

        Ok(Self { mean, std })
    }

    /// Number of feature dimensions the scaler was fitted for
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// True if the scaler has no dimensions
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Standardize a raw feature vector
    ///
    /// Dimensions with a degenerate fitted standard deviation are centered
    /// but not divided.
    ///
    /// # Errors
    ///
    /// Returns `DetectError::Internal` on a dimensionality mismatch.
    pub fn transform(&self, features: &[f32]) -> Result<Vec<f32>, DetectError> {
        if features.len() != self.mean.len() {
            return Err(DetectError::Internal(format!(
                "scaler expects {} dimensions, got {}",
                self.mean.len(),
                features.len()
            )));
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(&x, (&m, &s))| {
                let centered = x - m;
                if s > EPSILON {
                    centered / s
                } else {
                    centered
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_and_transform() {
        let matrix = vec![vec![1.0f32, 10.0], vec![3.0f32, 10.0]];
        let scaler = StandardScaler::fit(&matrix).unwrap();

        assert!((scaler.mean[0] - 2.0).abs() < 1e-6);
        assert!((scaler.std[0] - 1.0).abs() < 1e-6);

        let scaled = scaler.transform(&[3.0, 10.0]).unwrap();
        assert!((scaled[0] - 1.0).abs() < 1e-6);
        // Constant dimension is centered only.
        assert!(scaled[1].abs() < 1e-6);
    }

    #[test]
    fn test_transform_centers_training_rows() {
        let matrix = vec![
            vec![1.0f32, -4.0, 0.5],
            vec![2.0f32, 0.0, 0.5],
            vec![3.0f32, 4.0, 0.5],
        ];
        let scaler = StandardScaler::fit(&matrix).unwrap();

        // Scaled training rows must average to zero per dimension.
        let scaled: Vec<Vec<f32>> = matrix
            .iter()
            .map(|row| scaler.transform(row).unwrap())
            .collect();
        for d in 0..3 {
            let mean: f32 = scaled.iter().map(|r| r[d]).sum::<f32>() / 3.0;
            assert!(mean.abs() < 1e-6, "dim {} mean {}", d, mean);
        }
    }

    #[test]
    fn test_fit_empty_matrix() {
        assert!(matches!(
            StandardScaler::fit(&[]),
            Err(DetectError::Internal(_))
        ));
    }

    #[test]
    fn test_fit_ragged_matrix() {
        let matrix = vec![vec![1.0f32, 2.0], vec![1.0f32]];
        assert!(StandardScaler::fit(&matrix).is_err());
    }

    #[test]
    fn test_transform_dimension_mismatch() {
        let scaler = StandardScaler {
            mean: vec![0.0; 56],
            std: vec![1.0; 56],
        };
        assert!(scaler.transform(&[1.0; 10]).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let scaler = StandardScaler {
            mean: vec![1.5, -0.5],
            std: vec![2.0, 0.25],
        };
        let json = serde_json::to_string(&scaler).unwrap();
        let loaded: StandardScaler = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.mean, scaler.mean);
        assert_eq!(loaded.std, scaler.std);
    }
}
