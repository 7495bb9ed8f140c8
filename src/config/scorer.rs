// src/config/scorer.rs
//! Scorer configuration: jitter, composite weights and keyword vocabularies.
//!
//! Resolution order for `ScorerConfig::from_toml()`:
//! 1) `$SCORER_CONFIG_PATH` (must exist if set)
//! 2) `config/scorer.toml`
//! 3) built-in seed (`ScorerConfig::default()`)
//!
//! `$SCORER_JITTER` overrides `scoring.jitter` (clamped to `[0,1]`).
//! The loaded config is immutable; share it with `Arc`.

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analyze::weights::CompositeWeights;
use crate::upload::DEFAULT_UPLOAD_MARKER;

pub const DEFAULT_SCORER_CONFIG_PATH: &str = "config/scorer.toml";
pub const DEFAULT_JITTER: f32 = 0.1;

pub const ENV_SCORER_CONFIG_PATH: &str = "SCORER_CONFIG_PATH";
pub const ENV_SCORER_JITTER: &str = "SCORER_JITTER";

static BUILTIN: Lazy<Arc<ScorerConfig>> = Lazy::new(|| Arc::new(ScorerConfig::default()));

fn default_jitter() -> f32 {
    DEFAULT_JITTER
}

fn default_upload_marker() -> String {
    DEFAULT_UPLOAD_MARKER.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSection {
    /// Peak-to-peak width of the random perturbation added to each composite.
    #[serde(default = "default_jitter")]
    pub jitter: f32,
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            jitter: DEFAULT_JITTER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Business-metric terms looked for in the business goal.
    pub business_metrics: Vec<String>,
    /// Analysis-method terms looked for in a custom expected output.
    pub analysis_methods: Vec<String>,
    /// Substring the upload handler puts into the data scope summary.
    #[serde(default = "default_upload_marker")]
    pub upload_marker: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            business_metrics: to_strings(&[
                "revenue",
                "conversion",
                "retention",
                "kpi",
                "roi",
                "growth",
                "churn",
                "engagement",
                "acquisition",
                "profit",
                "margin",
                "cost",
                "target",
                "rate",
                "increase",
                "decrease",
                "reduce",
                "metric",
                "benchmark",
                "baseline",
                "lifetime value",
                "average order value",
                "sales",
                "customer satisfaction",
                "nps",
            ]),
            analysis_methods: to_strings(&[
                "regression",
                "clustering",
                "forecasting",
                "classification",
                "segmentation",
                "correlation",
                "a/b test",
                "cohort",
                "time series",
                "anomaly detection",
                "hypothesis",
                "causal",
                "attribution",
                "funnel",
                "sentiment",
            ]),
            upload_marker: default_upload_marker(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    #[serde(default)]
    pub scoring: ScoringSection,
    #[serde(default)]
    pub weights: CompositeWeights,
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

impl ScorerConfig {
    /// Process-wide built-in seed, validated once.
    pub fn builtin() -> Arc<ScorerConfig> {
        BUILTIN.clone()
    }

    /// Load using env var + fallbacks (see module docs), then apply env overrides.
    pub fn from_toml() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_SCORER_CONFIG_PATH) {
            Ok(p) => {
                let path = PathBuf::from(p);
                if !path.exists() {
                    bail!(
                        "{ENV_SCORER_CONFIG_PATH} points to non-existent path {}",
                        path.display()
                    );
                }
                Self::load_from_file(&path)?
            }
            Err(_) => {
                let path = PathBuf::from(DEFAULT_SCORER_CONFIG_PATH);
                if path.exists() {
                    Self::load_from_file(&path)?
                } else {
                    Self::default().validated()?
                }
            }
        };

        if let Some(j) = parse_jitter_env(std::env::var(ENV_SCORER_JITTER).ok()) {
            cfg.scoring.jitter = j;
        }
        Ok(cfg)
    }

    /// Load and validate a TOML file (no env overrides).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scorer config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing scorer config at {}", path.display()))
    }

    /// Parse and validate a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let cfg: ScorerConfig = toml::from_str(toml_str)?;
        cfg.validated()
    }

    /// Same config with a different jitter (clamped). `0.0` makes scoring deterministic.
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.scoring.jitter = sanitize_jitter(jitter);
        self
    }

    /// Normalize weights, clean vocabularies and reject unusable configs.
    pub fn validated(mut self) -> Result<Self> {
        self.weights = self.weights.normalized()?;

        if !self.scoring.jitter.is_finite() {
            bail!("scoring.jitter must be a finite number");
        }
        self.scoring.jitter = sanitize_jitter(self.scoring.jitter);

        self.vocabulary.business_metrics = clean_terms(&self.vocabulary.business_metrics);
        self.vocabulary.analysis_methods = clean_terms(&self.vocabulary.analysis_methods);
        if self.vocabulary.business_metrics.is_empty() {
            return Err(anyhow!("vocabulary.business_metrics is empty"));
        }
        if self.vocabulary.analysis_methods.is_empty() {
            return Err(anyhow!("vocabulary.analysis_methods is empty"));
        }

        self.vocabulary.upload_marker = self.vocabulary.upload_marker.trim().to_string();
        if self.vocabulary.upload_marker.is_empty() {
            bail!("vocabulary.upload_marker must not be empty");
        }
        Ok(self)
    }
}

fn sanitize_jitter(j: f32) -> f32 {
    if j.is_finite() {
        j.clamp(0.0, 1.0)
    } else {
        DEFAULT_JITTER
    }
}

// parse optional float env and clamp to <0.0..=1.0>
fn parse_jitter_env(raw: Option<String>) -> Option<f32> {
    raw.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

/// Lowercase, trim, drop blanks and duplicates (first occurrence wins).
fn clean_terms(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_seed_is_valid() {
        let cfg = ScorerConfig::default().validated().unwrap();
        assert_eq!(cfg, *ScorerConfig::builtin());
        assert!((cfg.scoring.jitter - DEFAULT_JITTER).abs() < f32::EPSILON);
        assert!(cfg.vocabulary.business_metrics.iter().any(|t| t == "kpi"));
        assert_eq!(cfg.vocabulary.upload_marker, "Files");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = ScorerConfig::from_toml_str(
            r#"
[scoring]
jitter = 0.0

[vocabulary]
business_metrics = [" Revenue ", "revenue", "", "KPI"]
analysis_methods = ["regression"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.scoring.jitter, 0.0);
        assert_eq!(cfg.vocabulary.business_metrics, vec!["revenue", "kpi"]);
        assert_eq!(cfg.vocabulary.upload_marker, "Files");
        assert_eq!(cfg.weights, CompositeWeights::default());
    }

    #[test]
    fn jitter_is_clamped_and_nan_rejected() {
        let cfg = ScorerConfig::from_toml_str("[scoring]\njitter = 5.0\n").unwrap();
        assert_eq!(cfg.scoring.jitter, 1.0);
        assert!(ScorerConfig::from_toml_str("[scoring]\njitter = nan\n").is_err());
        assert_eq!(ScorerConfig::default().with_jitter(-1.0).scoring.jitter, 0.0);
    }

    #[test]
    fn empty_vocabulary_is_a_load_error() {
        let err = ScorerConfig::from_toml_str(
            r#"
[vocabulary]
business_metrics = []
analysis_methods = ["regression"]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("business_metrics"), "{err:#}");
    }

    #[test]
    fn env_threshold_parse() {
        assert_eq!(parse_jitter_env(Some(" 0.25 ".into())), Some(0.25));
        assert_eq!(parse_jitter_env(Some("2".into())), Some(1.0));
        assert_eq!(parse_jitter_env(Some("abc".into())), None);
        assert_eq!(parse_jitter_env(None), None);
    }

    #[test]
    fn load_from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorer.toml");
        {
            let mut f = fs::File::create(&path).unwrap();
            write!(f, "[weights.clarity]\ntitle = 0\nbusiness_goal = 0\n").unwrap();
        }
        let err = ScorerConfig::load_from_file(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("scorer.toml"), "{msg}");
        assert!(msg.contains("clarity"), "{msg}");
    }
}
