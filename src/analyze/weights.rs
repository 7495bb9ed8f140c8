//! Composite weights, one group per composite score.
//!
//! TOML shape (all groups optional; missing groups fall back to the defaults below):
//! ```toml
//! [weights.clarity]
//! title = 0.4
//! business_goal = 0.6
//! data_scope = 0.0
//!
//! [weights.feasibility]
//! data_scope = 0.3
//! expected_output = 0.5
//! output_bonus = 0.2
//!
//! [weights.completeness]
//! title = 0.3
//! business_goal = 0.5
//! data_scope = 0.2
//! ```
//!
//! Groups are normalized to sum to 1.0 at load time, so configs may use any
//! positive scale (e.g. `2, 3, 0`).

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClarityWeights {
    pub title: f32,
    pub business_goal: f32,
    /// Zero by default: data scope is optional and stays out of clarity.
    #[serde(default)]
    pub data_scope: f32,
}

impl Default for ClarityWeights {
    fn default() -> Self {
        Self {
            title: 0.4,
            business_goal: 0.6,
            data_scope: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityWeights {
    pub data_scope: f32,
    pub expected_output: f32,
    /// Paid when the submitter named an expected output at all.
    pub output_bonus: f32,
}

impl Default for FeasibilityWeights {
    fn default() -> Self {
        Self {
            data_scope: 0.3,
            expected_output: 0.5,
            output_bonus: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletenessWeights {
    pub title: f32,
    pub business_goal: f32,
    pub data_scope: f32,
}

impl Default for CompletenessWeights {
    fn default() -> Self {
        Self {
            title: 0.3,
            business_goal: 0.5,
            data_scope: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    #[serde(default)]
    pub clarity: ClarityWeights,
    #[serde(default)]
    pub feasibility: FeasibilityWeights,
    #[serde(default)]
    pub completeness: CompletenessWeights,
}

impl CompositeWeights {
    /// Validate and rescale every group to sum to 1.0.
    pub fn normalized(self) -> Result<Self> {
        let [title, business_goal, data_scope] = normalize3(
            "clarity",
            [
                self.clarity.title,
                self.clarity.business_goal,
                self.clarity.data_scope,
            ],
        )?;
        let clarity = ClarityWeights {
            title,
            business_goal,
            data_scope,
        };

        let [data_scope, expected_output, output_bonus] = normalize3(
            "feasibility",
            [
                self.feasibility.data_scope,
                self.feasibility.expected_output,
                self.feasibility.output_bonus,
            ],
        )?;
        let feasibility = FeasibilityWeights {
            data_scope,
            expected_output,
            output_bonus,
        };

        let [title, business_goal, data_scope] = normalize3(
            "completeness",
            [
                self.completeness.title,
                self.completeness.business_goal,
                self.completeness.data_scope,
            ],
        )?;
        let completeness = CompletenessWeights {
            title,
            business_goal,
            data_scope,
        };

        Ok(Self {
            clarity,
            feasibility,
            completeness,
        })
    }
}

fn normalize3(group: &str, w: [f32; 3]) -> Result<[f32; 3]> {
    if w.iter().any(|x| !x.is_finite() || *x < 0.0) {
        bail!("weights.{group}: weights must be finite and non-negative, got {w:?}");
    }
    let sum: f32 = w.iter().sum();
    if sum <= f32::EPSILON {
        bail!("weights.{group}: weights must have a positive sum");
    }
    if (sum - 1.0).abs() <= 1e-6 {
        return Ok(w);
    }
    Ok(w.map(|x| x / sum))
}
