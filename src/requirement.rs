//! requirement.rs: input/output shapes of the scorer.
//!
//! `ScoringInput` is what the intake handler hands over; `ScoringResult` is what it
//! persists next to the requirement record. Field names on the wire follow the
//! persisted record (`clarity_score`, ..., `ai_feedback`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Business priority chosen by the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "high", alias = "HIGH")]
    High,
    #[default]
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "low", alias = "LOW")]
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Lenient parse used by callers holding free-form form values.
    /// Anything unrecognized (including empty) is `Medium`.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Textual fields of a submitted requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringInput {
    pub title: String,
    pub business_goal: String,
    /// May already carry the upload summary line (see `upload`).
    #[serde(default)]
    pub data_scope: String,
    #[serde(default)]
    pub expected_output: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}

impl ScoringInput {
    pub fn new(title: impl Into<String>, business_goal: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            business_goal: business_goal.into(),
            ..Self::default()
        }
    }

    pub fn with_data_scope(mut self, data_scope: impl Into<String>) -> Self {
        self.data_scope = data_scope.into();
        self
    }

    /// Empty strings are stored as-is; the scorer treats them like `None`.
    pub fn with_expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = Some(expected_output.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Expected output if the caller supplied non-blank text.
    pub fn expected_output_text(&self) -> Option<&str> {
        self.expected_output
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Three bounded scores plus the feedback report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    #[serde(rename = "clarity_score")]
    pub clarity: f32,
    #[serde(rename = "feasibility_score")]
    pub feasibility: f32,
    #[serde(rename = "completeness_score")]
    pub completeness: f32,
    #[serde(rename = "ai_feedback")]
    pub feedback: String,
}

impl ScoringResult {
    pub fn new(clarity: f32, feasibility: f32, completeness: f32, feedback: impl Into<String>) -> Self {
        Self {
            clarity: clamp01(clarity),
            feasibility: clamp01(feasibility),
            completeness: clamp01(completeness),
            feedback: feedback.into(),
        }
    }

    /// Mean of the three composites (drives the overall banner).
    pub fn mean(&self) -> f32 {
        (self.clarity + self.feasibility + self.completeness) / 3.0
    }

    /// True when every composite is a finite number inside `[0,1]`.
    pub fn is_sane(&self) -> bool {
        [self.clarity, self.feasibility, self.completeness]
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }
}

/// Clamp into `[0,1]`. NaN passes through so `is_sane` can catch it.
pub(crate) fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}
