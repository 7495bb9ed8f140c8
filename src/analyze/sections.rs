//! Per-section sub-analyses. Each returns a fixed-shape score set whose
//! sub-metrics are all in `[0,1]`, plus the facts the feedback rules need.

use super::keywords::{coverage_from_hits, matched_terms};
use super::output_types::{priority_alignment, CanonicalOutput, ALIGNMENT_NEUTRAL};
use crate::config::Vocabulary;
use crate::requirement::{clamp01, Priority, ScoringInput};
use crate::upload::UploadDetector;

/// Where a count falls relative to a section's breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    VeryShort,
    Short,
    Ideal,
    Long,
}

/// Three ascending upper bounds and the score for each of the four bands.
#[derive(Debug, Clone, Copy)]
pub struct Breakpoints {
    bounds: [usize; 3],
    scores: [f32; 4],
}

impl Breakpoints {
    pub const fn new(bounds: [usize; 3], scores: [f32; 4]) -> Self {
        Self { bounds, scores }
    }

    pub fn band(&self, n: usize) -> Band {
        let [a, b, c] = self.bounds;
        if n < a {
            Band::VeryShort
        } else if n < b {
            Band::Short
        } else if n < c {
            Band::Ideal
        } else {
            Band::Long
        }
    }

    pub fn score(&self, band: Band) -> f32 {
        let [vs, s, i, l] = self.scores;
        match band {
            Band::VeryShort => vs,
            Band::Short => s,
            Band::Ideal => i,
            Band::Long => l,
        }
    }
}

pub const TITLE_CHARS: Breakpoints = Breakpoints::new([5, 10, 50], [0.2, 0.5, 0.9, 0.7]);
pub const TITLE_WORDS: Breakpoints = Breakpoints::new([2, 4, 8], [0.3, 0.6, 0.9, 0.7]);
pub const GOAL_CHARS: Breakpoints = Breakpoints::new([30, 100, 500], [0.2, 0.5, 0.9, 0.8]);

/// Single paragraph longer than this should have been split.
pub const LONG_PARAGRAPH_CHARS: usize = 200;

/// Flat baseline for the optional data-scope section.
pub const DATA_SCOPE_BASELINE: f32 = 0.8;
/// Sub-metric value when no expected output was given.
pub const ABSENT_OUTPUT_DEFAULT: f32 = 0.8;
pub const CUSTOM_OUTPUT_VALIDITY: f32 = 0.5;
/// Encouragement for describing a custom deliverable.
pub const CUSTOM_OUTPUT_BONUS: f32 = 0.7;

/// Common view over a section's sub-metrics.
pub trait SectionScoreSet {
    /// Sub-metric values that count toward the section average.
    fn metrics(&self) -> Vec<f32>;

    fn average(&self) -> f32 {
        let m = self.metrics();
        if m.is_empty() {
            return 0.0;
        }
        clamp01(m.iter().sum::<f32>() / m.len() as f32)
    }
}

/* ----------------------------
Title
---------------------------- */

#[derive(Debug, Clone, PartialEq)]
pub struct TitleScores {
    pub length: f32,
    pub descriptive: f32,
    pub length_band: Band,
    pub word_band: Band,
    pub chars: usize,
    pub words: usize,
}

impl SectionScoreSet for TitleScores {
    fn metrics(&self) -> Vec<f32> {
        vec![self.length, self.descriptive]
    }
}

pub fn analyze_title(title: &str) -> TitleScores {
    let t = title.trim();
    let chars = t.chars().count();
    let words = t.split_whitespace().count();
    let length_band = TITLE_CHARS.band(chars);
    let word_band = TITLE_WORDS.band(words);
    TitleScores {
        length: TITLE_CHARS.score(length_band),
        descriptive: TITLE_WORDS.score(word_band),
        length_band,
        word_band,
        chars,
        words,
    }
}

/* ----------------------------
Business goal
---------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    /// One paragraph over `LONG_PARAGRAPH_CHARS`.
    Wall,
    Paragraphs,
    Plain,
}

impl Structure {
    pub fn score(self) -> f32 {
        match self {
            Structure::Wall => 0.4,
            Structure::Paragraphs => 0.8,
            Structure::Plain => 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusinessGoalScores {
    pub length: f32,
    pub metrics: f32,
    pub structure: f32,
    pub length_band: Band,
    pub layout: Structure,
    pub chars: usize,
    pub paragraphs: usize,
    /// Business-metric terms found (vocabulary order).
    pub metric_terms: Vec<String>,
}

impl SectionScoreSet for BusinessGoalScores {
    fn metrics(&self) -> Vec<f32> {
        vec![self.length, self.metrics, self.structure]
    }
}

pub fn analyze_business_goal(goal: &str, vocab: &Vocabulary) -> BusinessGoalScores {
    let chars = goal.trim().chars().count();
    let length_band = GOAL_CHARS.band(chars);

    let terms = matched_terms(goal, &vocab.business_metrics);
    let metrics = coverage_from_hits(goal, terms.len(), vocab.business_metrics.len());

    let paragraphs = goal.matches('\n').count() + 1;
    let layout = if paragraphs == 1 && chars > LONG_PARAGRAPH_CHARS {
        Structure::Wall
    } else if paragraphs > 1 {
        Structure::Paragraphs
    } else {
        Structure::Plain
    };

    BusinessGoalScores {
        length: GOAL_CHARS.score(length_band),
        metrics: clamp01(metrics),
        structure: layout.score(),
        length_band,
        layout,
        chars,
        paragraphs,
        metric_terms: terms.into_iter().map(str::to_string).collect(),
    }
}

/* ----------------------------
Data scope
---------------------------- */

#[derive(Debug, Clone, PartialEq)]
pub struct DataScopeScores {
    pub relevance: f32,
    pub detail: f32,
    pub chars: usize,
    /// Feedback-only facts; never change the numbers above.
    pub upload_detected: bool,
    pub file_count: Option<usize>,
}

impl SectionScoreSet for DataScopeScores {
    fn metrics(&self) -> Vec<f32> {
        vec![self.relevance, self.detail]
    }
}

pub fn analyze_data_scope(scope: &str, detector: &UploadDetector) -> DataScopeScores {
    let upload = detector.detect(scope);
    DataScopeScores {
        relevance: DATA_SCOPE_BASELINE,
        detail: DATA_SCOPE_BASELINE,
        chars: scope.trim().chars().count(),
        upload_detected: upload.detected,
        file_count: upload.file_count,
    }
}

/* ----------------------------
Expected output
---------------------------- */

#[derive(Debug, Clone, PartialEq)]
pub enum OutputKind {
    Absent,
    Canonical(CanonicalOutput),
    /// Free text; `suggestion` is set when it looks like a misspelled canonical label.
    Custom { suggestion: Option<CanonicalOutput> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedOutputScores {
    pub kind: OutputKind,
    pub validity: f32,
    pub priority_alignment: f32,
    /// Custom outputs only.
    pub custom: Option<f32>,
    /// Custom outputs only: analysis-method coverage.
    pub methods: Option<f32>,
}

impl ExpectedOutputScores {
    pub fn is_present(&self) -> bool {
        !matches!(self.kind, OutputKind::Absent)
    }
}

impl SectionScoreSet for ExpectedOutputScores {
    fn metrics(&self) -> Vec<f32> {
        let mut m = vec![self.validity, self.priority_alignment];
        m.extend(self.custom);
        m.extend(self.methods);
        m
    }
}

pub fn analyze_expected_output(
    expected: Option<&str>,
    priority: Priority,
    vocab: &Vocabulary,
) -> ExpectedOutputScores {
    let Some(text) = expected.map(str::trim).filter(|s| !s.is_empty()) else {
        return ExpectedOutputScores {
            kind: OutputKind::Absent,
            validity: ABSENT_OUTPUT_DEFAULT,
            priority_alignment: ABSENT_OUTPUT_DEFAULT,
            custom: None,
            methods: None,
        };
    };

    if let Some(canonical) = CanonicalOutput::from_label(text) {
        return ExpectedOutputScores {
            kind: OutputKind::Canonical(canonical),
            validity: 1.0,
            priority_alignment: priority_alignment(canonical, priority),
            custom: None,
            methods: None,
        };
    }

    let hits = matched_terms(text, &vocab.analysis_methods).len();
    ExpectedOutputScores {
        kind: OutputKind::Custom {
            suggestion: CanonicalOutput::suggest(text),
        },
        validity: CUSTOM_OUTPUT_VALIDITY,
        priority_alignment: ALIGNMENT_NEUTRAL,
        custom: Some(CUSTOM_OUTPUT_BONUS),
        methods: Some(clamp01(coverage_from_hits(
            text,
            hits,
            vocab.analysis_methods.len(),
        ))),
    }
}

/* ----------------------------
All sections
---------------------------- */

#[derive(Debug, Clone, PartialEq)]
pub struct Sections {
    pub title: TitleScores,
    pub business_goal: BusinessGoalScores,
    pub data_scope: DataScopeScores,
    pub expected_output: ExpectedOutputScores,
}

pub fn analyze_sections(
    input: &ScoringInput,
    vocab: &Vocabulary,
    detector: &UploadDetector,
) -> Sections {
    Sections {
        title: analyze_title(&input.title),
        business_goal: analyze_business_goal(&input.business_goal, vocab),
        data_scope: analyze_data_scope(&input.data_scope, detector),
        expected_output: analyze_expected_output(
            input.expected_output.as_deref(),
            input.priority,
            vocab,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::default()
    }

    #[test]
    fn title_breakpoints() {
        assert_eq!(analyze_title("x").length, 0.2);
        assert_eq!(analyze_title("abcdef").length, 0.5);
        assert_eq!(analyze_title("Improve checkout conversion").length, 0.9);
        assert_eq!(analyze_title(&"a".repeat(50)).length, 0.7);

        assert_eq!(analyze_title("Dashboard").descriptive, 0.3);
        assert_eq!(analyze_title("Churn dashboard").descriptive, 0.6);
        assert_eq!(analyze_title("Weekly churn dashboard for EMEA").descriptive, 0.9);
        assert_eq!(
            analyze_title("one two three four five six seven eight").descriptive,
            0.7
        );
    }

    #[test]
    fn empty_title_does_not_panic() {
        let t = analyze_title("   ");
        assert_eq!(t.chars, 0);
        assert_eq!(t.words, 0);
        assert_eq!(t.length_band, Band::VeryShort);
        assert!((t.average() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn goal_length_is_monotone_up_to_ideal() {
        let mut last = 0.0;
        for n in (10..=300).step_by(5) {
            let s = analyze_business_goal(&"a".repeat(n), &vocab()).length;
            assert!(s >= last, "length score dropped at {n}: {s} < {last}");
            last = s;
        }
        assert_eq!(analyze_business_goal(&"a".repeat(600), &vocab()).length, 0.8);
    }

    #[test]
    fn goal_structure() {
        let wall = analyze_business_goal(&"word ".repeat(50), &vocab());
        assert_eq!(wall.layout, Structure::Wall);
        assert_eq!(wall.structure, 0.4);

        let split = analyze_business_goal("Context.\nObjective.\nSuccess criteria.", &vocab());
        assert_eq!(split.paragraphs, 3);
        assert_eq!(split.structure, 0.8);

        let plain = analyze_business_goal("", &vocab());
        assert_eq!(plain.structure, 0.6);
        assert_eq!(plain.metrics, 0.0);
        assert_eq!(plain.length, 0.2);
    }

    #[test]
    fn goal_metrics_are_case_insensitive() {
        let a = analyze_business_goal("Revenue growth is key", &vocab());
        let b = analyze_business_goal("revenue growth is key", &vocab());
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.metric_terms, vec!["revenue", "growth"]);
    }

    #[test]
    fn data_scope_is_flat_regardless_of_upload() {
        let d = UploadDetector::default();
        let plain = analyze_data_scope("", &d);
        let uploaded = analyze_data_scope("EU orders\nSupporting Files (3): a, b, c", &d);
        assert_eq!(plain.average(), uploaded.average());
        assert_eq!(plain.average(), DATA_SCOPE_BASELINE);
        assert!(uploaded.upload_detected);
        assert_eq!(uploaded.file_count, Some(3));
        assert!(!plain.upload_detected);
    }

    #[test]
    fn expected_output_branches() {
        let absent = analyze_expected_output(None, Priority::Medium, &vocab());
        assert!(!absent.is_present());
        assert_eq!(absent.average(), ABSENT_OUTPUT_DEFAULT);
        let blank = analyze_expected_output(Some("  "), Priority::High, &vocab());
        assert_eq!(blank.kind, OutputKind::Absent);

        let model = analyze_expected_output(Some("Predictive Model"), Priority::Low, &vocab());
        assert_eq!(model.kind, OutputKind::Canonical(CanonicalOutput::PredictiveModel));
        assert_eq!(model.validity, 1.0);
        assert_eq!(model.priority_alignment, 0.4);

        let custom = analyze_expected_output(
            Some("Churn forecasting with cohort regression"),
            Priority::Medium,
            &vocab(),
        );
        assert_eq!(custom.validity, CUSTOM_OUTPUT_VALIDITY);
        assert_eq!(custom.custom, Some(CUSTOM_OUTPUT_BONUS));
        assert!(custom.methods.unwrap() > 0.0);
        assert_eq!(custom.metrics().len(), 4);
    }
}
