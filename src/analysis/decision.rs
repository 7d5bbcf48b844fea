//! Decision aggregation
//!
//! Averages the three calibrated positive-class probabilities into one
//! confidence score and maps it to a three-way classification with a
//! fixed explanation string per band. The ensemble averages calibrated
//! probabilities and thresholds the average; it never votes by majority
//! label, which would change behavior at the margins.

use crate::analysis::result::{Classification, Decision};
use crate::error::DetectError;

/// Confidence strictly above this is classified AI-generated
pub const AI_THRESHOLD: f32 = 0.6;

/// Confidence strictly below this is classified human
pub const HUMAN_THRESHOLD: f32 = 0.4;

const EXPLANATION_AI: &str = "Consistent spectral patterns and reduced micro-variations.";
const EXPLANATION_HUMAN: &str = "Natural pitch drift and temporal irregularities detected.";
const EXPLANATION_UNCERTAIN: &str = "Mixed or ambiguous acoustic characteristics.";

/// Round to 3 decimal digits
fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Aggregate calibrated probabilities into a decision
///
/// Thresholds are strict: a confidence of exactly 0.6 or exactly 0.4
/// lands in the uncertain band. The returned confidence is rounded to 3
/// decimals; classification is decided on the unrounded mean.
///
/// # Errors
///
/// Returns `DetectError::Internal` if no probabilities are given or any
/// of them is outside [0, 1]. All classifier calls must have succeeded
/// before aggregation; there is no partial-result path.
pub fn aggregate(probabilities: &[f32]) -> Result<Decision, DetectError> {
    if probabilities.is_empty() {
        return Err(DetectError::Internal(
            "no classifier probabilities to aggregate".to_string(),
        ));
    }
    for &p in probabilities {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(DetectError::Internal(format!(
                "probability out of range: {}",
                p
            )));
        }
    }

    let sum: f64 = probabilities.iter().map(|&p| p as f64).sum();
    let confidence = (sum / probabilities.len() as f64) as f32;

    let (classification, explanation) = if confidence > AI_THRESHOLD {
        (Classification::AiGenerated, EXPLANATION_AI)
    } else if confidence < HUMAN_THRESHOLD {
        (Classification::Human, EXPLANATION_HUMAN)
    } else {
        (Classification::Uncertain, EXPLANATION_UNCERTAIN)
    };

    log::debug!(
        "Aggregated {} probabilities -> confidence {:.4} -> {}",
        probabilities.len(),
        confidence,
        classification.as_str()
    );

    Ok(Decision {
        classification,
        confidence: round3(confidence),
        explanation: explanation.to_string(),
    })
}
