// tests/scorer_config.rs
// Config resolution (env path, ./config fallback, built-in seed) and jitter override.

use clarifai_scorer::config::scorer::{ENV_SCORER_CONFIG_PATH, ENV_SCORER_JITTER};
use clarifai_scorer::{ScorerConfig, ScoringService};
use std::{env, fs};

const SMALL_TOML: &str = r#"
[scoring]
jitter = 0.0

[weights.clarity]
title = 2
business_goal = 3

[vocabulary]
business_metrics = [" Revenue ", "revenue", "Churn"]
analysis_methods = ["Regression"]
"#;

#[test]
fn inline_toml_is_normalized_and_cleaned() {
    let cfg = ScorerConfig::from_toml_str(SMALL_TOML).unwrap();
    assert_eq!(cfg.scoring.jitter, 0.0);
    assert!((cfg.weights.clarity.title - 0.4).abs() < 1e-6);
    assert!((cfg.weights.clarity.business_goal - 0.6).abs() < 1e-6);
    assert_eq!(cfg.weights.clarity.data_scope, 0.0);
    assert_eq!(cfg.vocabulary.business_metrics, vec!["revenue", "churn"]);
    assert_eq!(cfg.vocabulary.analysis_methods, vec!["regression"]);
    assert_eq!(cfg.vocabulary.upload_marker, "Files");
}

#[test]
fn unusable_configs_are_rejected() {
    let empty_vocab = r#"
[vocabulary]
business_metrics = []
analysis_methods = ["regression"]
"#;
    assert!(ScorerConfig::from_toml_str(empty_vocab).is_err());

    let zero_weights = r#"
[weights.feasibility]
data_scope = 0
expected_output = 0
output_bonus = 0
"#;
    assert!(ScorerConfig::from_toml_str(zero_weights).is_err());

    let negative = r#"
[weights.completeness]
title = -1
business_goal = 1
data_scope = 1
"#;
    assert!(ScorerConfig::from_toml_str(negative).is_err());
}

#[test]
fn shipped_config_matches_builtin_seed() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/scorer.toml");
    let shipped = ScorerConfig::load_from_file(&path).unwrap();
    assert_eq!(shipped, *ScorerConfig::builtin());
}

#[serial_test::serial]
#[test]
fn resolution_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is not picked up.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_SCORER_CONFIG_PATH);
    env::remove_var(ENV_SCORER_JITTER);

    // 1) Nothing on disk → built-in seed
    let cfg = ScorerConfig::from_toml().unwrap();
    assert_eq!(cfg, *ScorerConfig::builtin());

    // 2) ./config/scorer.toml
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("scorer.toml"), SMALL_TOML).unwrap();
    let cfg = ScorerConfig::from_toml().unwrap();
    assert_eq!(cfg.vocabulary.business_metrics, vec!["revenue", "churn"]);

    // 3) Env path wins
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, "[scoring]\njitter = 0.25\n").unwrap();
    env::set_var(ENV_SCORER_CONFIG_PATH, p_env.display().to_string());
    let cfg = ScorerConfig::from_toml().unwrap();
    assert!((cfg.scoring.jitter - 0.25).abs() < 1e-6);

    // 4) Env path pointing nowhere is an error
    env::set_var(ENV_SCORER_CONFIG_PATH, tmp.path().join("missing.toml"));
    assert!(ScorerConfig::from_toml().is_err());
    assert!(ScoringService::from_env().is_degraded());

    env::remove_var(ENV_SCORER_CONFIG_PATH);
    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn jitter_env_override_is_clamped() {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_SCORER_CONFIG_PATH);

    env::set_var(ENV_SCORER_JITTER, "0");
    assert_eq!(ScorerConfig::from_toml().unwrap().scoring.jitter, 0.0);

    env::set_var(ENV_SCORER_JITTER, "5");
    assert_eq!(ScorerConfig::from_toml().unwrap().scoring.jitter, 1.0);

    // Garbage is ignored
    env::set_var(ENV_SCORER_JITTER, "lots");
    assert_eq!(ScorerConfig::from_toml().unwrap().scoring.jitter, 0.1);

    env::remove_var(ENV_SCORER_JITTER);
    env::set_current_dir(&old).unwrap();
}
