//! Example: Build a training feature matrix from a labeled dataset
//!
//! Usage:
//!   cargo run --release --example extract_dataset -- <dataset_dir> <output_dir>
//!
//! Expects <dataset_dir>/human and <dataset_dir>/ai subdirectories. Writes
//! dataset.json (feature matrix with labels) and scaler.json (fitted on
//! the matrix) to <output_dir>.

use std::path::Path;
use std::process::ExitCode;

use voiceprobe::ml::ensemble::{write_artifact, SCALER_FILE};
use voiceprobe::training::{extract_dataset, fit_scaler, AI_LABEL, HUMAN_LABEL};
use voiceprobe::FeatureConfig;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: extract_dataset <dataset_dir> <output_dir>");
        return ExitCode::FAILURE;
    }
    let dataset_dir = Path::new(&args[1]);
    let output_dir = Path::new(&args[2]);

    let config = FeatureConfig::default();
    let matrix = match extract_dataset(dataset_dir, &config) {
        Ok(matrix) => matrix,
        Err(e) => {
            eprintln!("Extraction failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let human = matrix.labels.iter().filter(|&&l| l == HUMAN_LABEL).count();
    let ai = matrix.labels.iter().filter(|&&l| l == AI_LABEL).count();
    println!(
        "Extracted {} rows ({} human, {} ai), {} features each",
        matrix.len(),
        human,
        ai,
        config.feature_len()
    );

    let scaler = match fit_scaler(&matrix) {
        Ok(scaler) => scaler,
        Err(e) => {
            eprintln!("Scaler fitting failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::create_dir_all(output_dir) {
        eprintln!("Cannot create {}: {}", output_dir.display(), e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = write_artifact(&output_dir.join("dataset.json"), &matrix) {
        eprintln!("Cannot write dataset: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = write_artifact(&output_dir.join(SCALER_FILE), &scaler) {
        eprintln!("Cannot write scaler: {}", e);
        return ExitCode::FAILURE;
    }

    println!("Wrote dataset.json and {} to {}", SCALER_FILE, output_dir.display());
    ExitCode::SUCCESS
}
