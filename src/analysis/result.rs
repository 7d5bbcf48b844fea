//! Detection result types

use serde::{Deserialize, Serialize};

/// Three-way classification of a voice sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// The sample is judged to be synthetically generated
    AiGenerated,
    /// The sample is judged to be a human speaker
    Human,
    /// The ensemble cannot commit either way
    Uncertain,
}

impl Classification {
    /// Wire spelling of the label ("AI_GENERATED" | "HUMAN" | "UNCERTAIN")
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::AiGenerated => "AI_GENERATED",
            Classification::Human => "HUMAN",
            Classification::Uncertain => "UNCERTAIN",
        }
    }
}

/// Complete detection decision for one voice sample
///
/// Produced per request, never persisted or reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Three-way classification label
    pub classification: Classification,

    /// Mean of the three calibrated probabilities, rounded to 3 decimals
    pub confidence: f32,

    /// Human-readable explanation, selected by confidence band
    pub explanation: String,
}
