//! Rule-based feedback per section and final report assembly.
//!
//! Report layout (sections without notes are skipped entirely):
//! ```text
//! Overall: <banner>
//!
//! Title:
//! - ...
//!
//! Business Goal:
//! - ...
//!
//! <closing line>
//! ```

use super::output_types::{CanonicalOutput, ALIGNMENT_BOOST, ALIGNMENT_PENALTY};
use super::scoring::Composites;
use super::sections::{
    Band, BusinessGoalScores, DataScopeScores, ExpectedOutputScores, OutputKind, Sections,
    Structure, TitleScores,
};
use crate::requirement::Priority;

/// Below this coverage the business goal "lacks metrics".
pub const LOW_METRICS: f32 = 0.3;
/// Below this coverage a custom output "lacks methods".
pub const LOW_METHODS: f32 = 0.3;
/// Data scope shorter than this (and without files) gets a specificity hint.
pub const SHORT_SCOPE_CHARS: usize = 50;

pub const CLOSING_LINE: &str =
    "Thank you for the submission. Researchers will follow up on any open questions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Comprehensive,
    Reasonable,
    NeedsImprovement,
}

impl Banner {
    pub fn from_mean(mean: f32) -> Self {
        if mean >= 0.8 {
            Banner::Comprehensive
        } else if mean >= 0.6 {
            Banner::Reasonable
        } else {
            Banner::NeedsImprovement
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Banner::Comprehensive => {
                "This requirement is comprehensive and ready for researchers to pick up."
            }
            Banner::Reasonable => {
                "This requirement is reasonable; the notes below would make it sharper."
            }
            Banner::NeedsImprovement => {
                "This requirement needs improvement before researchers can act on it."
            }
        }
    }
}

/// Notes for one section under a fixed heading.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionFeedback {
    pub heading: &'static str,
    pub notes: Vec<String>,
}

pub fn title_notes(t: &TitleScores) -> Vec<String> {
    let mut notes = Vec::new();
    match t.length_band {
        _ if t.chars == 0 => notes.push(
            "Title is missing. Add a short phrase naming the problem to solve.".to_string(),
        ),
        Band::VeryShort | Band::Short => notes.push(format!(
            "Title is too short ({} characters). Aim for 10-50 characters that name the problem.",
            t.chars
        )),
        Band::Long => notes.push(format!(
            "Title is long ({} characters). Keep it under 50 characters and move details to the business goal.",
            t.chars
        )),
        Band::Ideal => {}
    }
    match t.word_band {
        _ if t.words == 0 => {}
        Band::VeryShort => notes.push(
            "Title is a single word. Say what should change, e.g. \"Reduce checkout abandonment\"."
                .to_string(),
        ),
        Band::Long => {
            notes.push("Title has many words. Keep it to one focused idea.".to_string())
        }
        Band::Short | Band::Ideal => {}
    }
    notes
}

pub fn business_goal_notes(g: &BusinessGoalScores) -> Vec<String> {
    let mut notes = Vec::new();
    if g.chars == 0 {
        notes.push(
            "Business goal is missing. Describe the business problem and the outcome you expect."
                .to_string(),
        );
        return notes;
    }
    match g.length_band {
        Band::VeryShort => notes.push(
            "Business goal is too short. Explain the context, the decision it supports, and how success is measured."
                .to_string(),
        ),
        Band::Short => notes.push(
            "Consider providing more details about your business goal.".to_string(),
        ),
        Band::Long => notes.push(
            "Business goal is very long. Summarize the key objective in the first sentences."
                .to_string(),
        ),
        Band::Ideal => {}
    }
    if g.metrics < LOW_METRICS {
        notes.push(
            "Business goal lacks measurable metrics. Name the KPI you want to move (e.g. conversion, retention, revenue) and a target."
                .to_string(),
        );
    }
    if g.layout == Structure::Wall {
        notes.push(
            "Business goal is one long paragraph. Split background, objective and success criteria onto separate lines."
                .to_string(),
        );
    }
    notes
}

pub fn data_scope_notes(d: &DataScopeScores) -> Vec<String> {
    let mut notes = Vec::new();
    if d.upload_detected {
        match d.file_count {
            Some(1) => notes.push("1 supporting file attached.".to_string()),
            Some(n) => notes.push(format!("{n} supporting files attached.")),
            None => notes.push("Supporting files attached.".to_string()),
        }
        return notes;
    }
    if d.chars == 0 {
        notes.push(
            "No data scope given. If you know it, add the time range, geographic scope, or user segments."
                .to_string(),
        );
    } else if d.chars < SHORT_SCOPE_CHARS {
        notes.push(
            "The data scope could be more specific. Consider including time range, geographic scope, or user segments."
                .to_string(),
        );
    }
    notes
}

pub fn expected_output_notes(o: &ExpectedOutputScores, priority: Priority) -> Vec<String> {
    let mut notes = Vec::new();
    match &o.kind {
        OutputKind::Absent => notes.push(format!(
            "No expected output selected. Picking one (e.g. \"{}\") helps researchers scope the work.",
            CanonicalOutput::ActionableInsights.label()
        )),
        OutputKind::Canonical(c) => {
            if o.priority_alignment <= ALIGNMENT_PENALTY {
                notes.push(format!(
                    "\"{}\" is a heavyweight deliverable for a {} priority request. This combination is unusual; consider raising the priority or choosing a lighter output.",
                    c.label(),
                    priority
                ));
            } else if o.priority_alignment >= ALIGNMENT_BOOST {
                notes.push(format!(
                    "\"{}\" fits a {} priority request well.",
                    c.label(),
                    priority
                ));
            }
        }
        OutputKind::Custom { suggestion } => {
            notes.push(
                "Custom expected output noted. Describe the deliverable format so researchers can size it."
                    .to_string(),
            );
            if let Some(s) = suggestion {
                notes.push(format!("Did you mean \"{}\"?", s.label()));
            }
            if o.methods.unwrap_or(0.0) < LOW_METHODS {
                notes.push(
                    "Mention the analysis methods you expect (e.g. regression, clustering, forecasting)."
                        .to_string(),
                );
            }
        }
    }
    notes
}

/// Per-section feedback in fixed order; empty sections are dropped.
pub fn section_feedback(s: &Sections, priority: Priority) -> Vec<SectionFeedback> {
    [
        SectionFeedback {
            heading: "Title",
            notes: title_notes(&s.title),
        },
        SectionFeedback {
            heading: "Business Goal",
            notes: business_goal_notes(&s.business_goal),
        },
        SectionFeedback {
            heading: "Data Scope",
            notes: data_scope_notes(&s.data_scope),
        },
        SectionFeedback {
            heading: "Expected Output",
            notes: expected_output_notes(&s.expected_output, priority),
        },
    ]
    .into_iter()
    .filter(|f| !f.notes.is_empty())
    .collect()
}

/// Banner, section notes, closing line.
pub fn assemble(s: &Sections, priority: Priority, composites: &Composites) -> String {
    let banner = Banner::from_mean(composites.mean());
    let mut blocks = vec![format!("Overall: {}", banner.message())];
    for f in section_feedback(s, priority) {
        let mut block = format!("{}:", f.heading);
        for n in &f.notes {
            block.push_str("\n- ");
            block.push_str(n);
        }
        blocks.push(block);
    }
    blocks.push(CLOSING_LINE.to_string());
    blocks.join("\n\n")
}
