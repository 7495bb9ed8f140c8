//! Dev-only scoring diagnostics.
//!
//! Enabled when SCORER_DEV_LOG=1 AND a dev environment
//! (debug build, or APP_ENV in {local, development, dev}).
//! Raw requirement text is never logged: only a short hash of it.

use sha2::{Digest, Sha256};
use tracing::info;

use crate::requirement::{ScoringInput, ScoringResult};

pub const ENV_SCORER_DEV_LOG: &str = "SCORER_DEV_LOG";
pub const ENV_APP_ENV: &str = "APP_ENV";

const ID_BYTES: usize = 6;
/// Metric terms logged per event.
const LOGGED_TERMS: usize = 5;

pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_SCORER_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    is_dev_env_name(&std::env::var(ENV_APP_ENV).unwrap_or_default())
}

fn is_dev_env_name(name: &str) -> bool {
    matches!(
        name.trim().to_ascii_lowercase().as_str(),
        "local" | "development" | "dev"
    )
}

/// Stable anonymized id for a requirement: hex of the first 6 bytes of
/// SHA-256 over title and business goal.
pub(crate) fn requirement_id(input: &ScoringInput) -> String {
    let digest = Sha256::new()
        .chain_update(input.title.as_bytes())
        .chain_update([0x1fu8])
        .chain_update(input.business_goal.as_bytes())
        .finalize();
    digest[..ID_BYTES].iter().map(|b| format!("{b:02x}")).collect()
}

/// Minimal, anonymized dev logger for scoring events.
pub(crate) fn dev_log_scoring(
    event: &str,
    input: &ScoringInput,
    result: &ScoringResult,
    metric_terms: &[String],
) {
    if !dev_logging_enabled() {
        return;
    }
    let id = requirement_id(input);
    let terms: Vec<&str> = metric_terms
        .iter()
        .take(LOGGED_TERMS)
        .map(String::as_str)
        .collect();
    info!(
        target: "scorer",
        %id,
        event,
        priority = %input.priority,
        clarity = result.clarity,
        feasibility = result.feasibility,
        completeness = result.completeness,
        feedback_lines = result.feedback.lines().count(),
        metric_terms = ?terms
    );
}
