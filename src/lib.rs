// src/lib.rs
// Public library surface for the requirement-intake service (and integration tests).

pub mod analyze;
pub mod config;
pub mod debug;
pub mod fallback;
pub mod requirement;
pub mod service;
pub mod upload;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{Analysis, RequirementScorer};
pub use crate::config::ScorerConfig;
pub use crate::requirement::{Priority, ScoringInput, ScoringResult};
pub use crate::service::ScoringService;

use once_cell::sync::Lazy;

/// Process-wide service, configured from env on first use and never mutated.
static SERVICE: Lazy<ScoringService> = Lazy::new(ScoringService::from_env);

/// Shared service for callers that don't manage their own.
pub fn service() -> &'static ScoringService {
    &SERVICE
}

/// Score one requirement with the shared service. Never fails.
///
/// ```ignore
/// let input = clarifai_scorer::ScoringInput::new("Improve checkout conversion", "...");
/// let result = clarifai_scorer::score_requirement(&input);
/// persist(result.clarity, result.feasibility, result.completeness, &result.feedback);
/// ```
pub fn score_requirement(input: &ScoringInput) -> ScoringResult {
    SERVICE.evaluate(input)
}
