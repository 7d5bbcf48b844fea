//! Example: Detect whether a single audio file is AI-generated
//!
//! Usage:
//!   cargo run --release --example detect_file -- <model_dir> <audio_file> [language]

use std::path::Path;
use std::process::ExitCode;

use voiceprobe::config::is_supported_language;
use voiceprobe::{detect_voice, FeatureConfig, VoiceDetector, SUPPORTED_LANGUAGES};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: detect_file <model_dir> <audio_file> [language]");
        return ExitCode::FAILURE;
    }
    let model_dir = Path::new(&args[1]);
    let audio_path = Path::new(&args[2]);
    let language = args.get(3).map(|s| s.as_str());

    if let Some(lang) = language {
        if !is_supported_language(lang) {
            eprintln!(
                "Unsupported language '{}' (supported: {})",
                lang,
                SUPPORTED_LANGUAGES.join(", ")
            );
            return ExitCode::FAILURE;
        }
    }

    let detector = match VoiceDetector::load(model_dir) {
        Ok(detector) => detector,
        Err(e) => {
            eprintln!("Failed to load models: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match detect_voice(audio_path, language, &detector, &FeatureConfig::default()) {
        Ok(decision) => {
            println!("Classification: {}", decision.classification.as_str());
            println!("Confidence:     {:.3}", decision.confidence);
            println!("Explanation:    {}", decision.explanation);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Detection failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
