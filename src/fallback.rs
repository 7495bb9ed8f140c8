//! Caller-level fallbacks that need no vocabulary or weights.
//!
//! - `simple_scores`: length/presence heuristic, used when a rich result looks wrong.
//! - `degraded`: flat 0.5 scores with a diagnostic, used when the scorer is unavailable.

use crate::requirement::{ScoringInput, ScoringResult};

/// Field length (chars) that counts as "detailed" for the simple heuristic.
pub const DETAIL_CHARS: usize = 50;
pub const DEGRADED_SCORE: f32 = 0.5;

pub fn simple_scores(input: &ScoringInput) -> ScoringResult {
    let goal_detailed = input.business_goal.chars().count() > DETAIL_CHARS;
    let scope_detailed = input.data_scope.chars().count() > DETAIL_CHARS;
    let has_output = input.expected_output_text().is_some();

    let mut clarity = 0.0;
    if goal_detailed {
        clarity += 0.5;
    }
    if scope_detailed {
        clarity += 0.5;
    }

    let mut feasibility = 0.0;
    if goal_detailed {
        feasibility += 0.5;
    }
    if has_output {
        feasibility += 0.5;
    }

    let mut completeness = 0.0;
    if !input.title.trim().is_empty() {
        completeness += 0.33;
    }
    if !input.business_goal.trim().is_empty() {
        completeness += 0.33;
    }
    if has_output {
        completeness += 0.34;
    }

    let mut feedback = Vec::new();
    if !goal_detailed {
        feedback.push("Consider providing more details about your business goal.");
    }
    if !scope_detailed {
        feedback.push(
            "The data scope could be more specific. Consider including time range, geographic scope, or user segments.",
        );
    }
    if feedback.is_empty() {
        feedback.push(
            "Your requirement is well-defined. Consider adding any additional context that might help researchers.",
        );
    }

    ScoringResult::new(clarity, feasibility, completeness, feedback.join(" "))
}

pub fn degraded(reason: &str) -> ScoringResult {
    ScoringResult::new(
        DEGRADED_SCORE,
        DEGRADED_SCORE,
        DEGRADED_SCORE,
        format!(
            "Unable to analyze requirement: {}. Please check your inputs and try again.",
            reason.trim().trim_end_matches('.')
        ),
    )
}
