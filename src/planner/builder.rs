use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::{FoodItem, MealPlan, MealSlot, NutritionTarget, SlotCap, SlotCaps};

/// Stepwise construction of a [`MealPlan`].
///
/// Items are checked against their meal times as they are added; slot item
/// counts and nutritional limits are checked once, in [`build`](Self::build).
///
/// ```
/// use meal_planner_rs::models::{FoodItem, NutritionTarget};
/// use meal_planner_rs::planner::MealPlanBuilder;
///
/// let mut builder = MealPlanBuilder::new();
/// builder
///     .add_breakfast(FoodItem::new("Porridge", 300.0, 10.0, 6.0, 50.0))?
///     .add_lunch(FoodItem::new("Stew", 550.0, 30.0, 20.0, 55.0))?
///     .add_dinner(FoodItem::new("Salad", 250.0, 8.0, 12.0, 20.0))?;
/// let plan = builder.build(&NutritionTarget::new())?;
/// assert_eq!(plan.len(), 3);
/// # Ok::<(), meal_planner_rs::PlannerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MealPlanBuilder {
    plan: MealPlan,
    caps: SlotCaps,
}

impl MealPlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all slot caps.
    pub fn slot_caps(&mut self, caps: SlotCaps) -> &mut Self {
        self.caps = caps;
        self
    }

    /// Set the item count range for one slot.
    pub fn slot_limits(&mut self, slot: MealSlot, min: usize, max: usize) -> &mut Self {
        self.caps.set(slot, SlotCap::new(min, max));
        self
    }

    /// Add a food to a slot it is suitable for.
    pub fn add_to_slot(&mut self, slot: MealSlot, item: FoodItem) -> Result<&mut Self> {
        if !item.suits(slot) {
            return Err(PlannerError::UnsuitableSlot {
                food: item.name,
                slot,
            });
        }
        debug!("{} <- {}", slot, item.debug_string());
        self.plan.slot_mut(slot).push(item);
        Ok(self)
    }

    pub fn add_breakfast(&mut self, item: FoodItem) -> Result<&mut Self> {
        self.add_to_slot(MealSlot::Breakfast, item)
    }

    pub fn add_lunch(&mut self, item: FoodItem) -> Result<&mut Self> {
        self.add_to_slot(MealSlot::Lunch, item)
    }

    pub fn add_dinner(&mut self, item: FoodItem) -> Result<&mut Self> {
        self.add_to_slot(MealSlot::Dinner, item)
    }

    pub fn add_snack(&mut self, item: FoodItem) -> Result<&mut Self> {
        self.add_to_slot(MealSlot::Snack, item)
    }

    /// Number of items currently in a slot.
    pub fn count(&self, slot: MealSlot) -> usize {
        self.plan.slot(slot).len()
    }

    /// Validate slot counts and every limit in `target`, then produce the plan.
    pub fn build(&self, target: &NutritionTarget) -> Result<MealPlan> {
        let plan = self.build_unchecked()?;

        let totals = plan.totals();
        for (nutrient, limit) in target.limits.iter() {
            let value = totals.get(nutrient);
            if let Some(bound) = limit.violation(value) {
                return Err(PlannerError::LimitViolated {
                    nutrient,
                    value,
                    bound,
                });
            }
        }

        Ok(plan)
    }

    /// Validate slot counts only.
    pub fn build_unchecked(&self) -> Result<MealPlan> {
        self.caps.validate()?;
        for slot in MealSlot::ALL {
            let cap = self.caps.get(slot);
            let count = self.count(slot);
            if count < cap.min {
                return Err(PlannerError::SlotTooFew {
                    slot,
                    count,
                    min: cap.min,
                });
            }
            if count > cap.max {
                return Err(PlannerError::SlotTooMany {
                    slot,
                    count,
                    max: cap.max,
                });
            }
        }
        Ok(self.plan.clone())
    }
}
