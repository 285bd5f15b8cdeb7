use crate::models::MealSlot;

/// Number of tracked nutrients; scores are averaged over all of them.
pub const NUTRIENT_COUNT: f64 = 4.0;

/// Ratio of item value to slot target above which an item counts as overshooting.
pub const OVERSHOOT_RATIO: f64 = 1.5;

/// Floor for the target divisor when scoring, so tiny targets do not explode ratios.
pub const MIN_SCORE_DIVISOR: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Knapsack discretization
// ─────────────────────────────────────────────────────────────────────────────

/// Width of one calorie bucket in the knapsack table.
pub const CALORIE_BUCKET: f64 = 10.0;

/// Slot calorie ceiling as a multiple of the slot calorie target.
pub const SLOT_CALORIE_HEADROOM: f64 = 1.5;

/// Upper bound on buckets per slot to keep the table small.
pub const MAX_BUCKETS: usize = 2_000;

// ─────────────────────────────────────────────────────────────────────────────
// Quick mode
// ─────────────────────────────────────────────────────────────────────────────

/// Default maximum foods in a quick combination.
pub const DEFAULT_COMBINATION_ITEMS: usize = 5;

/// Smallest combination quick mode considers.
pub const MIN_COMBINATION_ITEMS: usize = 2;

/// Refuse exhaustive searches larger than this.
pub const MAX_COMBINATIONS: u128 = 5_000_000;

// ─────────────────────────────────────────────────────────────────────────────
// Target comparison thresholds (percent deviation)
// ─────────────────────────────────────────────────────────────────────────────

pub const ON_TRACK_PCT: f64 = 10.0;
pub const CLOSE_PCT: f64 = 20.0;

/// Tag that keeps a food off the breakfast table.
pub const MEAT_TAG: &str = "meat";

/// Share of the daily target assigned to each slot.
pub fn slot_share(slot: MealSlot) -> f64 {
    match slot {
        MealSlot::Breakfast => 0.25,
        MealSlot::Lunch => 0.35,
        MealSlot::Dinner => 0.30,
        MealSlot::Snack => 0.10,
    }
}
