//! Canonical expected-output types and their priority alignment.
//!
//! The set is closed; anything else the submitter types is a custom output.
//! Near-misses (e.g. "Data Visualisation") are detected with
//! `strsim::normalized_levenshtein` so the feedback can suggest the canonical label.

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;

use crate::requirement::Priority;

/// Heavyweight output asked for at Low priority.
pub const ALIGNMENT_PENALTY: f32 = 0.4;
/// Lightweight output asked for at High priority.
pub const ALIGNMENT_BOOST: f32 = 0.9;
pub const ALIGNMENT_NEUTRAL: f32 = 0.7;

/// Minimum similarity for a "did you mean" suggestion.
pub const SUGGESTION_SIMILARITY: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalOutput {
    ActionableInsights,
    DataVisualization,
    StatisticalAnalysis,
    PredictiveModel,
}

/// Rough delivery cost of an output type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effort {
    Light,
    Heavy,
}

impl CanonicalOutput {
    pub const ALL: [CanonicalOutput; 4] = [
        CanonicalOutput::ActionableInsights,
        CanonicalOutput::DataVisualization,
        CanonicalOutput::StatisticalAnalysis,
        CanonicalOutput::PredictiveModel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CanonicalOutput::ActionableInsights => "Actionable Insights",
            CanonicalOutput::DataVisualization => "Data Visualization",
            CanonicalOutput::StatisticalAnalysis => "Statistical Analysis",
            CanonicalOutput::PredictiveModel => "Predictive Model",
        }
    }

    pub fn effort(self) -> Effort {
        match self {
            CanonicalOutput::ActionableInsights | CanonicalOutput::DataVisualization => {
                Effort::Light
            }
            CanonicalOutput::StatisticalAnalysis | CanonicalOutput::PredictiveModel => {
                Effort::Heavy
            }
        }
    }

    /// Exact match on the label, ignoring case and surrounding/inner whitespace runs.
    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = normalize(raw);
        Self::ALL
            .into_iter()
            .find(|c| normalize(c.label()) == needle)
    }

    /// Closest canonical label for a custom output, if it is a likely typo.
    pub fn suggest(raw: &str) -> Option<Self> {
        let needle = normalize(raw);
        if needle.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .map(|c| (c, normalized_levenshtein(&needle, &normalize(c.label()))))
            .filter(|(_, sim)| *sim >= SUGGESTION_SIMILARITY)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c)
    }
}

/// Alignment lookup keyed on (output effort, priority).
pub fn priority_alignment(output: CanonicalOutput, priority: Priority) -> f32 {
    match (output.effort(), priority) {
        (Effort::Heavy, Priority::Low) => ALIGNMENT_PENALTY,
        (Effort::Light, Priority::High) => ALIGNMENT_BOOST,
        _ => ALIGNMENT_NEUTRAL,
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
