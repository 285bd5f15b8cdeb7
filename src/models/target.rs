use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::nutrient::{MealSlot, Nutrient, NutrientMap};

/// Weight of a nutrient that has no explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Relative calorie band applied when only a calorie target is given.
pub const DEFAULT_CALORIE_TOLERANCE: f64 = 0.10;

/// Inclusive lower and/or upper bound on a daily total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Limit {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn contains(&self, value: f64) -> bool {
        self.violation(value).is_none()
    }

    /// Describe how `value` breaks this limit, if it does.
    pub fn violation(&self, value: f64) -> Option<String> {
        if let Some(min) = self.min {
            if value < min {
                return Some(format!("< minimum {:.1}", min));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some(format!("> maximum {:.1}", max));
            }
        }
        None
    }

    fn validate(&self, nutrient: Nutrient) -> Result<()> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(PlannerError::InvalidTarget(format!(
                    "{} limit must be a non-negative number, got {}",
                    nutrient, bound
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(PlannerError::InvalidTarget(format!(
                    "{} limit minimum {} exceeds maximum {}",
                    nutrient, min, max
                )));
            }
        }
        Ok(())
    }
}

/// Desired daily values, their importance weights and hard limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionTarget {
    pub targets: NutrientMap<f64>,
    pub weights: NutrientMap<f64>,
    pub limits: NutrientMap<Limit>,
}

impl NutritionTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.targets.set(nutrient, Some(value));
        self
    }

    pub fn weighted(mut self, nutrient: Nutrient, weight: f64) -> Self {
        self.weights.set(nutrient, Some(weight));
        self
    }

    pub fn limit(mut self, nutrient: Nutrient, limit: Limit) -> Self {
        self.limits.set(nutrient, Some(limit));
        self
    }

    /// Importance of a nutrient; unset weights count as 1.0.
    pub fn weight(&self, nutrient: Nutrient) -> f64 {
        self.weights.get(nutrient).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Give a calorie target without an explicit limit a ±10% band.
    pub fn with_default_calorie_limit(mut self) -> Self {
        if let Some(&cal) = self.targets.get(Nutrient::Calories) {
            if !self.limits.contains(Nutrient::Calories) && cal > 0.0 {
                let band = cal * DEFAULT_CALORIE_TOLERANCE;
                self.limits
                    .set(Nutrient::Calories, Some(Limit::between(cal - band, cal + band)));
            }
        }
        self
    }

    /// Reject negative or non-finite values and inverted limits.
    pub fn validate(&self) -> Result<()> {
        for (nutrient, &value) in self.targets.iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::InvalidTarget(format!(
                    "{} target must be a non-negative number, got {}",
                    nutrient, value
                )));
            }
        }
        for (nutrient, &weight) in self.weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PlannerError::InvalidTarget(format!(
                    "{} weight must be a non-negative number, got {}",
                    nutrient, weight
                )));
            }
        }
        for (nutrient, limit) in self.limits.iter() {
            limit.validate(nutrient)?;
        }
        Ok(())
    }
}

/// Minimum and maximum number of items in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCap {
    pub min: usize,
    pub max: usize,
}

impl SlotCap {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// Item caps for every slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotCaps {
    pub breakfast: SlotCap,
    pub lunch: SlotCap,
    pub dinner: SlotCap,
    pub snack: SlotCap,
}

impl Default for SlotCaps {
    fn default() -> Self {
        Self {
            breakfast: SlotCap::new(1, 2),
            lunch: SlotCap::new(1, 3),
            dinner: SlotCap::new(1, 3),
            snack: SlotCap::new(0, 2),
        }
    }
}

impl SlotCaps {
    pub fn get(&self, slot: MealSlot) -> SlotCap {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            MealSlot::Snack => self.snack,
        }
    }

    pub fn set(&mut self, slot: MealSlot, cap: SlotCap) {
        match slot {
            MealSlot::Breakfast => self.breakfast = cap,
            MealSlot::Lunch => self.lunch = cap,
            MealSlot::Dinner => self.dinner = cap,
            MealSlot::Snack => self.snack = cap,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for slot in MealSlot::ALL {
            let cap = self.get(slot);
            if cap.min > cap.max {
                return Err(PlannerError::InvalidInput(format!(
                    "{} minimum {} exceeds maximum {}",
                    slot, cap.min, cap.max
                )));
            }
        }
        Ok(())
    }
}
