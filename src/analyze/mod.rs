// src/analyze/mod.rs
//! Requirement analysis pipeline: sections → composites → jitter → feedback.

pub mod feedback;
pub mod keywords;
pub mod output_types;
pub mod scoring;
pub mod sections;
pub mod weights;

use anyhow::Result;
use rand::Rng;
use std::sync::Arc;

use crate::config::ScorerConfig;
use crate::debug::dev_log_scoring;
use crate::requirement::{ScoringInput, ScoringResult};
use crate::upload::UploadDetector;

// Re-export convenient types.
pub use crate::analyze::feedback::{Banner, SectionFeedback};
pub use crate::analyze::keywords::keyword_coverage;
pub use crate::analyze::output_types::{priority_alignment, CanonicalOutput};
pub use crate::analyze::scoring::{Composites, SectionAverages};
pub use crate::analyze::sections::{
    BusinessGoalScores, DataScopeScores, ExpectedOutputScores, OutputKind, SectionScoreSet,
    Sections, TitleScores,
};
pub use crate::analyze::weights::CompositeWeights;

/// Full breakdown of one scoring call.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub sections: Sections,
    /// Composites before jitter.
    pub base: Composites,
    pub result: ScoringResult,
}

/// Heuristic scorer over an immutable, shared configuration.
/// Cheap to clone; safe to use from many threads at once.
#[derive(Debug, Clone)]
pub struct RequirementScorer {
    cfg: Arc<ScorerConfig>,
    detector: UploadDetector,
}

impl RequirementScorer {
    /// Validate `cfg` (normalized weights, cleaned vocabularies) and build a scorer over it.
    pub fn new(cfg: ScorerConfig) -> Result<Self> {
        Ok(Self::from_validated(Arc::new(cfg.validated()?)))
    }

    /// `cfg` has already been through `ScorerConfig::validated`.
    pub(crate) fn from_validated(cfg: Arc<ScorerConfig>) -> Self {
        let detector = UploadDetector::new(&cfg.vocabulary.upload_marker);
        Self { cfg, detector }
    }

    /// Scorer over the built-in seed configuration.
    pub fn builtin() -> Self {
        Self::from_validated(ScorerConfig::builtin())
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.cfg
    }

    /// Sub-analyses only; no randomness involved.
    pub fn sections(&self, input: &ScoringInput) -> Sections {
        sections::analyze_sections(input, &self.cfg.vocabulary, &self.detector)
    }

    /// Score with a caller-supplied random source (pin it for deterministic tests).
    pub fn analyze<R: Rng + ?Sized>(&self, input: &ScoringInput, rng: &mut R) -> Analysis {
        let sections = self.sections(input);
        let base = scoring::compose(&sections, &self.cfg.weights);
        let c = scoring::jittered(base, self.cfg.scoring.jitter, rng);
        let text = feedback::assemble(&sections, input.priority, &c);
        let result = ScoringResult {
            clarity: c.clarity,
            feasibility: c.feasibility,
            completeness: c.completeness,
            feedback: text,
        };

        dev_log_scoring(
            "scored",
            input,
            &result,
            &sections.business_goal.metric_terms,
        );

        Analysis {
            sections,
            base,
            result,
        }
    }

    pub fn score<R: Rng + ?Sized>(&self, input: &ScoringInput, rng: &mut R) -> ScoringResult {
        self.analyze(input, rng).result
    }
}

impl Default for RequirementScorer {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn deterministic() -> RequirementScorer {
        RequirementScorer::new(ScorerConfig::default().with_jitter(0.0)).unwrap()
    }

    #[test]
    fn zero_jitter_result_equals_base() {
        let s = deterministic();
        let input = ScoringInput::new("Improve checkout conversion", "Grow revenue by 5%");
        let a = s.analyze(&input, &mut StdRng::seed_from_u64(1));
        assert_eq!(a.result.clarity, a.base.clarity);
        assert_eq!(a.result.feasibility, a.base.feasibility);
        assert_eq!(a.result.completeness, a.base.completeness);
    }

    #[test]
    fn clarity_ignores_data_scope_by_default() {
        let s = deterministic();
        let mut rng = StdRng::seed_from_u64(1);
        let a = s.score(&ScoringInput::new("Churn dashboard", "Reduce churn"), &mut rng);
        let b = s.score(
            &ScoringInput::new("Churn dashboard", "Reduce churn")
                .with_data_scope("All EU customers, Jan-Jun 2024, web and app"),
            &mut rng,
        );
        assert_eq!(a.clarity, b.clarity);
        assert!(b.completeness > a.completeness);
    }

    #[test]
    fn unnormalized_weights_are_normalized_on_construction() {
        let mut cfg = ScorerConfig::default().with_jitter(0.0);
        cfg.weights.clarity.data_scope = 0.5;
        let w = RequirementScorer::new(cfg).unwrap().config().weights.clarity;
        assert!((w.title + w.business_goal + w.data_scope - 1.0).abs() < 1e-6);
        assert!((w.data_scope - 0.5 / 1.5).abs() < 1e-6);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = ScorerConfig::default();
        cfg.vocabulary.business_metrics.clear();
        assert!(RequirementScorer::new(cfg).is_err());
    }

    #[test]
    fn uppercase_vocabulary_is_cleaned() {
        let mut cfg = ScorerConfig::default().with_jitter(0.0);
        cfg.vocabulary.business_metrics = vec!["KPI".into(), "Revenue".into()];
        let s = RequirementScorer::new(cfg).unwrap();
        let sec = s.sections(&ScoringInput::new("t", "Revenue KPI"));
        assert_eq!(sec.business_goal.metric_terms, vec!["kpi", "revenue"]);
        assert!(sec.business_goal.metrics > 0.0);
    }

    #[test]
    fn custom_marker_flows_into_detection() {
        let mut cfg = ScorerConfig::default().with_jitter(0.0);
        cfg.vocabulary.upload_marker = "Attachments".into();
        let s = RequirementScorer::new(cfg).unwrap();
        let sec = s.sections(
            &ScoringInput::new("t", "g").with_data_scope("Attachments (4): a, b, c, d"),
        );
        assert!(sec.data_scope.upload_detected);
        assert_eq!(sec.data_scope.file_count, Some(4));
    }
}
