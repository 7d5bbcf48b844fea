//! Dataset assembly for model fitting
//!
//! Walks a directory of labeled recordings, extracts the feature vector
//! for each one in parallel and fits the shared scaler. The classifier
//! fitting itself happens in an external component; this module produces
//! the standardized feature matrix it consumes.
//!
//! Expected layout under the dataset root:
//!
//! ```text
//! dataset/
//!   human/   recordings of real speakers
//!   ai/      synthetically generated recordings
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::FeatureConfig;
use crate::error::DetectError;
use crate::features::extract_features;
use crate::io::decoder::load_waveform;
use crate::ml::scaler::StandardScaler;

/// Label value for human recordings
pub const HUMAN_LABEL: u8 = 0;
/// Label value for AI-generated recordings
pub const AI_LABEL: u8 = 1;

/// Extracted feature vectors with their labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureMatrix {
    /// One feature vector per recording
    pub features: Vec<Vec<f32>>,
    /// Label per row (0 human, 1 AI-generated)
    pub labels: Vec<u8>,
}

impl FeatureMatrix {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True when no recordings survived extraction
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// List the files of one label directory, sorted by name
///
/// A missing directory yields an empty list so a dataset with only one
/// class still extracts; the caller decides whether that is acceptable.
fn list_audio_files(dir: &Path) -> Result<Vec<PathBuf>, DetectError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(DetectError::Internal(format!(
                "cannot read dataset directory {}: {}",
                dir.display(),
                e
            )))
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Extract features for every file of one label
///
/// Files that fail to decode or fail validation are skipped with a
/// warning rather than aborting the whole run.
fn extract_labeled(
    paths: &[PathBuf],
    label: u8,
    config: &FeatureConfig,
) -> Vec<(Vec<f32>, u8)> {
    paths
        .par_iter()
        .filter_map(|path| {
            match load_waveform(path, config).and_then(|samples| extract_features(&samples, config))
            {
                Ok(features) => Some((features, label)),
                Err(e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect()
}

/// Build the feature matrix from a labeled dataset directory
///
/// Reads `root/human` and `root/ai`, extracts the feature vector for
/// every decodable file and returns rows in a deterministic order
/// (human files first, then AI files, each sorted by file name).
///
/// # Errors
///
/// Returns `DetectError::Internal` if a label directory exists but
/// cannot be listed, or if no file in the whole dataset produced a
/// feature vector.
pub fn extract_dataset(root: &Path, config: &FeatureConfig) -> Result<FeatureMatrix, DetectError> {
    let human_files = list_audio_files(&root.join("human"))?;
    let ai_files = list_audio_files(&root.join("ai"))?;
    log::info!(
        "Extracting dataset: {} human files, {} ai files",
        human_files.len(),
        ai_files.len()
    );

    // par_iter preserves input order, so rows come out human-first,
    // each class sorted by file name, on every run.
    let mut rows = extract_labeled(&human_files, HUMAN_LABEL, config);
    rows.extend(extract_labeled(&ai_files, AI_LABEL, config));

    if rows.is_empty() {
        return Err(DetectError::Internal(format!(
            "no usable recordings found under {}",
            root.display()
        )));
    }

    let (features, labels): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
    Ok(FeatureMatrix { features, labels })
}

/// Fit the shared scaler on an extracted feature matrix
pub fn fit_scaler(matrix: &FeatureMatrix) -> Result<StandardScaler, DetectError> {
    StandardScaler::fit(&matrix.features)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_label_directories_yield_empty() {
        let root = std::env::temp_dir().join(format!("voiceprobe-empty-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();

        let err = extract_dataset(&root, &FeatureConfig::default()).unwrap_err();
        assert!(matches!(err, DetectError::Internal(_)));

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_undecodable_files_are_skipped() {
        let root = std::env::temp_dir().join(format!("voiceprobe-skip-{}", std::process::id()));
        std::fs::create_dir_all(root.join("human")).unwrap();
        std::fs::write(root.join("human/bad.wav"), b"not audio").unwrap();

        let err = extract_dataset(&root, &FeatureConfig::default()).unwrap_err();
        assert!(matches!(err, DetectError::Internal(_)));

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_fit_scaler_on_matrix() {
        let matrix = FeatureMatrix {
            features: vec![vec![1.0, 10.0], vec![3.0, 30.0]],
            labels: vec![HUMAN_LABEL, AI_LABEL],
        };
        let scaler = fit_scaler(&matrix).unwrap();
        assert_eq!(scaler.len(), 2);
    }
}
