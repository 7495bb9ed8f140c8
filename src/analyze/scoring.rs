//! Composite scoring: clarity, feasibility, completeness.
//!
//! `SectionAverages` are the four per-section means in [0,1]:
//! - `title`, `business_goal`, `data_scope`, `expected_output`
//!
//! clarity      = w.title*title + w.business_goal*goal + w.data_scope*scope
//! feasibility  = w.data_scope*scope + w.expected_output*output + w.output_bonus*[output given]
//! completeness = w.title*[title given] + w.business_goal*min(1, goal_chars/200)
//!              + w.data_scope*(upload ? 0.9 : min(1, scope_chars/150))
//!
//! Jitter is added after weighting, then everything is clamped to [0,1].

use rand::Rng;

use super::sections::{SectionScoreSet, Sections};
use super::weights::CompositeWeights;
use crate::requirement::clamp01;

/// Business-goal length that earns full completeness credit.
pub const GOAL_FULL_CHARS: f32 = 200.0;
/// Data-scope length that earns full completeness credit.
pub const SCOPE_FULL_CHARS: f32 = 150.0;
/// Completeness credit for the data scope when files were attached.
pub const UPLOAD_COMPLETENESS: f32 = 0.9;

/// Per-section averages. Keep it small and clear.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectionAverages {
    pub title: f32,
    pub business_goal: f32,
    pub data_scope: f32,
    pub expected_output: f32,
}

impl SectionAverages {
    /// Safe constructor with clamping.
    pub fn new(title: f32, business_goal: f32, data_scope: f32, expected_output: f32) -> Self {
        Self {
            title: clamp01(title),
            business_goal: clamp01(business_goal),
            data_scope: clamp01(data_scope),
            expected_output: clamp01(expected_output),
        }
    }

    pub fn from_sections(s: &Sections) -> Self {
        Self::new(
            s.title.average(),
            s.business_goal.average(),
            s.data_scope.average(),
            s.expected_output.average(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Composites {
    pub clarity: f32,
    pub feasibility: f32,
    pub completeness: f32,
}

impl Composites {
    pub fn mean(&self) -> f32 {
        (self.clarity + self.feasibility + self.completeness) / 3.0
    }

    pub fn clamped(self) -> Self {
        Self {
            clarity: clamp01(self.clarity),
            feasibility: clamp01(self.feasibility),
            completeness: clamp01(self.completeness),
        }
    }
}

/// Weighted composites before jitter (weights are expected to be normalized).
pub fn compose(sections: &Sections, w: &CompositeWeights) -> Composites {
    let avg = SectionAverages::from_sections(sections);

    let clarity = w.clarity.title * avg.title
        + w.clarity.business_goal * avg.business_goal
        + w.clarity.data_scope * avg.data_scope;

    let output_given = if sections.expected_output.is_present() {
        1.0
    } else {
        0.0
    };
    let feasibility = w.feasibility.data_scope * avg.data_scope
        + w.feasibility.expected_output * avg.expected_output
        + w.feasibility.output_bonus * output_given;

    let title_given = if sections.title.chars > 0 { 1.0 } else { 0.0 };
    let goal_credit = (sections.business_goal.chars as f32 / GOAL_FULL_CHARS).min(1.0);
    let scope_credit = if sections.data_scope.upload_detected {
        UPLOAD_COMPLETENESS
    } else {
        (sections.data_scope.chars as f32 / SCOPE_FULL_CHARS).min(1.0)
    };
    let completeness = w.completeness.title * title_given
        + w.completeness.business_goal * goal_credit
        + w.completeness.data_scope * scope_credit;

    Composites {
        clarity,
        feasibility,
        completeness,
    }
    .clamped()
}

/// `score + (u - 0.5) * amount`, `u ~ U[0,1)`, clamped. `amount <= 0` draws nothing.
pub fn apply_jitter<R: Rng + ?Sized>(score: f32, amount: f32, rng: &mut R) -> f32 {
    if amount <= 0.0 {
        return clamp01(score);
    }
    let u: f32 = rng.random();
    clamp01(score + (u - 0.5) * amount)
}

/// Jitter each composite independently (clarity, feasibility, completeness order).
pub fn jittered<R: Rng + ?Sized>(c: Composites, amount: f32, rng: &mut R) -> Composites {
    Composites {
        clarity: apply_jitter(c.clarity, amount, rng),
        feasibility: apply_jitter(c.feasibility, amount, rng),
        completeness: apply_jitter(c.completeness, amount, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn averages_are_clamped() {
        let a = SectionAverages::new(1.5, -0.2, 0.5, f32::INFINITY);
        assert_eq!(a.title, 1.0);
        assert_eq!(a.business_goal, 0.0);
        assert_eq!(a.expected_output, 1.0);
    }

    #[test]
    fn zero_jitter_is_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for s in [0.0, 0.33, 1.0] {
            assert_eq!(apply_jitter(s, 0.0, &mut rng), s);
        }
    }

    #[test]
    fn jitter_stays_within_half_amount_and_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = apply_jitter(0.5, 0.1, &mut rng);
            assert!((0.45..=0.55).contains(&v), "{v}");
        }
        for _ in 0..1000 {
            let lo = apply_jitter(0.0, 1.0, &mut rng);
            let hi = apply_jitter(1.0, 1.0, &mut rng);
            assert!((0.0..=1.0).contains(&lo));
            assert!((0.0..=1.0).contains(&hi));
        }
    }

    #[test]
    fn seeded_jitter_is_reproducible() {
        let c = Composites {
            clarity: 0.6,
            feasibility: 0.7,
            completeness: 0.8,
        };
        let a = jittered(c, 0.1, &mut StdRng::seed_from_u64(3));
        let b = jittered(c, 0.1, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
