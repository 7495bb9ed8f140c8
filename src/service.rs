//! Caller-facing scoring service: never fails.
//!
//! - Scorer available → rich heuristic result.
//! - Rich result not sane (non-finite / out of range) → `fallback::simple_scores`.
//! - Scorer unavailable (config could not be loaded) → `fallback::degraded`.

use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

use crate::analyze::RequirementScorer;
use crate::config::ScorerConfig;
use crate::debug::requirement_id;
use crate::fallback;
use crate::requirement::{ScoringInput, ScoringResult};

#[derive(Debug, Clone)]
enum Backend {
    Heuristic(RequirementScorer),
    Unavailable(Arc<str>),
}

#[derive(Debug, Clone)]
pub struct ScoringService {
    backend: Backend,
}

impl ScoringService {
    pub fn new(scorer: RequirementScorer) -> Self {
        Self {
            backend: Backend::Heuristic(scorer),
        }
    }

    /// Service that always answers with the degraded result.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self {
            backend: Backend::Unavailable(Arc::from(reason)),
        }
    }

    /// Wrap a config load; the config is validated here too. Failures are logged
    /// once and degrade the service.
    pub fn from_config(cfg: anyhow::Result<ScorerConfig>) -> Self {
        match cfg.and_then(RequirementScorer::new) {
            Ok(scorer) => {
                let cfg = scorer.config();
                info!(
                    jitter = cfg.scoring.jitter,
                    business_metrics = cfg.vocabulary.business_metrics.len(),
                    analysis_methods = cfg.vocabulary.analysis_methods.len(),
                    "scorer config loaded"
                );
                Self::new(scorer)
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "scorer config unavailable; using degraded scoring");
                Self::unavailable("scoring configuration could not be loaded")
            }
        }
    }

    /// Load config via `ScorerConfig::from_toml()` (env + fallbacks).
    pub fn from_env() -> Self {
        Self::from_config(ScorerConfig::from_toml())
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.backend, Backend::Unavailable(_))
    }

    pub fn scorer(&self) -> Option<&RequirementScorer> {
        match &self.backend {
            Backend::Heuristic(s) => Some(s),
            Backend::Unavailable(_) => None,
        }
    }

    /// Score with the thread-local RNG.
    pub fn evaluate(&self, input: &ScoringInput) -> ScoringResult {
        self.evaluate_with(input, &mut rand::rng())
    }

    pub fn evaluate_with<R: Rng + ?Sized>(
        &self,
        input: &ScoringInput,
        rng: &mut R,
    ) -> ScoringResult {
        match &self.backend {
            Backend::Unavailable(reason) => fallback::degraded(reason),
            Backend::Heuristic(scorer) => {
                let result = scorer.score(input, rng);
                if result.is_sane() {
                    result
                } else {
                    warn!(
                        id = %requirement_id(input),
                        clarity = result.clarity,
                        feasibility = result.feasibility,
                        completeness = result.completeness,
                        "heuristic result out of range; using simple scoring"
                    );
                    fallback::simple_scores(input)
                }
            }
        }
    }
}

impl Default for ScoringService {
    fn default() -> Self {
        Self::new(RequirementScorer::builtin())
    }
}
