use serde::Serialize;

use crate::models::{Nutrient, NutrientTotals, NutritionTarget};
use crate::planner::constants::{CLOSE_PCT, ON_TRACK_PCT};

/// How far an actual value is from its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    OnTrack,
    Close,
    OffTarget,
}

impl Status {
    pub fn from_pct(diff_pct: f64) -> Self {
        let magnitude = diff_pct.abs();
        if magnitude < ON_TRACK_PCT {
            Status::OnTrack
        } else if magnitude < CLOSE_PCT {
            Status::Close
        } else {
            Status::OffTarget
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Status::OnTrack => "[ok]",
            Status::Close => "[~~]",
            Status::OffTarget => "[!!]",
        }
    }
}

/// One nutrient's actual value against its target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetComparison {
    pub nutrient: Nutrient,
    pub actual: f64,
    pub target: f64,
    pub diff: f64,
    pub diff_pct: f64,
    pub status: Status,
}

/// Compare plan totals with every set target.
pub fn compare_to_targets(totals: &NutrientTotals, target: &NutritionTarget) -> Vec<TargetComparison> {
    target
        .targets
        .iter()
        .map(|(nutrient, &goal)| {
            let actual = totals.get(nutrient);
            let diff = actual - goal;
            let diff_pct = if goal > 0.0 { diff / goal * 100.0 } else { 0.0 };
            TargetComparison {
                nutrient,
                actual,
                target: goal,
                diff,
                diff_pct,
                status: Status::from_pct(diff_pct),
            }
        })
        .collect()
}

/// Actual value as a percentage of the target, if one is set and positive.
pub fn fulfillment_pct(totals: &NutrientTotals, target: &NutritionTarget, nutrient: Nutrient) -> Option<f64> {
    target
        .targets
        .get(nutrient)
        .filter(|goal| **goal > 0.0)
        .map(|goal| totals.get(nutrient) / goal * 100.0)
}
