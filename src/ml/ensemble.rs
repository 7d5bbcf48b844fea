//! Ensemble wiring and artifact loading
//!
//! A [`VoiceDetector`] bundles the fitted scaler with the three calibrated
//! classifiers. It is loaded once at process start and shared read-only
//! across requests; inference never mutates it.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DetectError;
use crate::ml::classifier::{
    ForestModel, LogisticModel, ProbabilisticClassifier, RbfSvmModel,
};
use crate::ml::scaler::StandardScaler;

/// Artifact file name for the fitted scaler
pub const SCALER_FILE: &str = "scaler.json";
/// Artifact file name for the logistic model
pub const LOGISTIC_FILE: &str = "logistic.json";
/// Artifact file name for the RBF SVM model
pub const SVM_FILE: &str = "svm.json";
/// Artifact file name for the tree-ensemble model
pub const FOREST_FILE: &str = "forest.json";

/// Read a serde artifact from disk
///
/// Missing or unparsable artifacts are server-side failures, never client
/// errors.
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, DetectError> {
    let data = fs::read_to_string(path).map_err(|e| {
        DetectError::Internal(format!("cannot read artifact {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&data).map_err(|e| {
        DetectError::Internal(format!("cannot parse artifact {}: {}", path.display(), e))
    })
}

/// Write a serde artifact to disk
pub fn write_artifact<T: Serialize>(path: &Path, artifact: &T) -> Result<(), DetectError> {
    let data = serde_json::to_string_pretty(artifact).map_err(|e| {
        DetectError::Internal(format!("cannot serialize artifact {}: {}", path.display(), e))
    })?;
    fs::write(path, data).map_err(|e| {
        DetectError::Internal(format!("cannot write artifact {}: {}", path.display(), e))
    })
}

/// Loaded model handles for one detection process
pub struct VoiceDetector {
    scaler: StandardScaler,
    classifiers: Vec<Box<dyn ProbabilisticClassifier>>,
}

impl std::fmt::Debug for VoiceDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceDetector")
            .field("scaler", &self.scaler)
            .field("classifiers", &self.classifiers.len())
            .finish()
    }
}

impl VoiceDetector {
    /// Assemble a detector from already-loaded artifacts
    ///
    /// # Errors
    ///
    /// Returns `DetectError::Internal` if the artifacts disagree on
    /// feature dimensionality.
    pub fn new(
        scaler: StandardScaler,
        logistic: LogisticModel,
        svm: RbfSvmModel,
        forest: ForestModel,
    ) -> Result<Self, DetectError> {
        if scaler.is_empty() {
            return Err(DetectError::Internal(
                "scaler artifact has no dimensions".to_string(),
            ));
        }

        let classifiers: Vec<Box<dyn ProbabilisticClassifier>> =
            vec![Box::new(logistic), Box::new(svm), Box::new(forest)];

        for classifier in &classifiers {
            if classifier.input_len() != scaler.len() {
                return Err(DetectError::Internal(format!(
                    "{} artifact expects {} dimensions but the scaler provides {}",
                    classifier.name(),
                    classifier.input_len(),
                    scaler.len()
                )));
            }
        }

        Ok(Self {
            scaler,
            classifiers,
        })
    }

    /// Load all four artifacts from a model directory
    ///
    /// Expects `scaler.json`, `logistic.json`, `svm.json` and
    /// `forest.json` under `model_dir`.
    pub fn load(model_dir: &Path) -> Result<Self, DetectError> {
        log::debug!("Loading model artifacts from {}", model_dir.display());

        let scaler: StandardScaler = read_artifact(&model_dir.join(SCALER_FILE))?;
        let logistic: LogisticModel = read_artifact(&model_dir.join(LOGISTIC_FILE))?;
        let svm: RbfSvmModel = read_artifact(&model_dir.join(SVM_FILE))?;
        let forest: ForestModel = read_artifact(&model_dir.join(FOREST_FILE))?;

        Self::new(scaler, logistic, svm, forest)
    }

    /// Feature dimensionality the loaded artifacts expect
    pub fn feature_len(&self) -> usize {
        self.scaler.len()
    }

    /// Scale a raw feature vector and query all three classifiers
    ///
    /// Returns the three calibrated positive-class probabilities in a
    /// fixed order (logistic, svm, forest). The scaled vector is computed
    /// once and shared read-only across the classifier calls. All three
    /// must succeed; there are no partial results.
    pub fn predict_probabilities(&self, features: &[f32]) -> Result<Vec<f32>, DetectError> {
        let scaled = self.scaler.transform(features)?;

        let mut probabilities = Vec::with_capacity(self.classifiers.len());
        for classifier in &self.classifiers {
            let p = classifier.predict_proba(&scaled)?;
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(DetectError::Internal(format!(
                    "{} produced an invalid probability: {}",
                    classifier.name(),
                    p
                )));
            }
            log::debug!("{} probability: {:.4}", classifier.name(), p);
            probabilities.push(p);
        }

        Ok(probabilities)
    }
}
