use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::models::{
    FoodItem, MealPlan, MealSlot, Nutrient, NutrientMap, NutrientTotals, NutritionTarget, SlotCap,
    SlotCaps,
};
use crate::planner::builder::MealPlanBuilder;
use crate::planner::constants::*;
use crate::planner::filters::{by_meal_time, by_name_not_in, filter_items, not_tag, Predicate};

/// How foods are chosen for each slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Dynamic programming over a discretized calorie axis.
    #[default]
    Knapsack,
    /// Rank by score, take while it helps.
    Greedy,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Knapsack => f.write_str("knapsack"),
            Strategy::Greedy => f.write_str("greedy"),
        }
    }
}

impl FromStr for Strategy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "knapsack" | "dp" => Ok(Strategy::Knapsack),
            "greedy" => Ok(Strategy::Greedy),
            other => Err(PlannerError::InvalidInput(format!(
                "unknown strategy '{}' (expected knapsack or greedy)",
                other
            ))),
        }
    }
}

/// Everything a selector needs to fill one slot.
#[derive(Debug, Clone)]
pub struct SlotRequest<'a> {
    pub slot: MealSlot,
    pub cap: SlotCap,
    /// This slot's share of the daily targets.
    pub targets: NutrientMap<f64>,
    pub target: &'a NutritionTarget,
    /// Totals already committed by earlier slots.
    pub day: NutrientTotals,
}

impl<'a> SlotRequest<'a> {
    pub fn new(slot: MealSlot, cap: SlotCap, target: &'a NutritionTarget, day: NutrientTotals) -> Self {
        Self {
            slot,
            cap,
            targets: slot_targets(target, slot),
            target,
            day,
        }
    }

    fn fits_day(&self, slot_totals: &NutrientTotals) -> bool {
        within_max_limits(self.target, &self.day.plus(slot_totals))
    }
}

/// Scale the daily targets down to one slot.
pub fn slot_targets(target: &NutritionTarget, slot: MealSlot) -> NutrientMap<f64> {
    let share = slot_share(slot);
    let mut scaled = NutrientMap::default();
    for (nutrient, &value) in target.targets.iter() {
        scaled.set(nutrient, Some(value * share));
    }
    scaled
}

/// How well a single food matches the slot targets.
///
/// Each targeted nutrient contributes `w * (1 - |1 - ratio|)`, or
/// `-w * (ratio - 1)` once the food alone overshoots by more than 50%.
/// The sum is averaged over all four nutrients.
pub fn score_food(food: &FoodItem, targets: &NutrientMap<f64>, target: &NutritionTarget) -> f64 {
    let mut score = 0.0;
    for (nutrient, &goal) in targets.iter() {
        if goal <= 0.0 {
            continue;
        }
        let weight = target.weight(nutrient);
        let ratio = food.nutrient_value(nutrient) / goal.max(MIN_SCORE_DIVISOR);
        score += if ratio > OVERSHOOT_RATIO {
            -weight * (ratio - 1.0)
        } else {
            weight * (1.0 - (1.0 - ratio).abs())
        };
    }
    score / NUTRIENT_COUNT
}

/// Weighted relative distance of `totals` from `targets`; zero is a perfect match.
pub fn deviation(totals: &NutrientTotals, targets: &NutrientMap<f64>, target: &NutritionTarget) -> f64 {
    targets
        .iter()
        .filter(|(_, goal)| **goal > 0.0)
        .map(|(nutrient, &goal)| target.weight(nutrient) * (totals.get(nutrient) - goal).abs() / goal)
        .sum()
}

/// True when no maximum limit is exceeded.
pub fn within_max_limits(target: &NutritionTarget, totals: &NutrientTotals) -> bool {
    target.limits.iter().all(|(nutrient, limit)| {
        limit
            .max
            .is_none_or(|max| totals.get(nutrient) <= max)
    })
}

/// Greedy knapsack-like selection.
///
/// Candidates are ranked by [`score_food`] (ties keep catalog order). A food
/// is taken while the slot has room, no daily maximum is exceeded, and it
/// either fills a required minimum or brings the slot closer to its targets.
pub fn greedy_select<'a>(candidates: &[&'a FoodItem], request: &SlotRequest) -> Vec<&'a FoodItem> {
    let mut ranked: Vec<(f64, &'a FoodItem)> = candidates
        .iter()
        .map(|&food| (score_food(food, &request.targets, request.target), food))
        .collect();
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut selected = Vec::new();
    let mut slot_totals = NutrientTotals::default();

    for (score, food) in ranked {
        if selected.len() >= request.cap.max {
            break;
        }

        let after = slot_totals.add(food);
        if !request.fits_day(&after) {
            debug!("{}: {} would exceed a daily limit", request.slot, food.name);
            continue;
        }

        let improves = deviation(&after, &request.targets, request.target)
            < deviation(&slot_totals, &request.targets, request.target);

        if selected.len() < request.cap.min || improves {
            debug!("{}: take {} (score {:.3})", request.slot, food.name, score);
            selected.push(food);
            slot_totals = after;
        }
    }

    selected
}

#[derive(Debug, Clone)]
struct Cell {
    items: Vec<usize>,
    totals: NutrientTotals,
    cost: f64,
}

/// Calorie ceiling for the knapsack table: the slot's headroom over its
/// calorie target and whatever the daily maximum still allows.
fn calorie_ceiling(candidates: &[&FoodItem], request: &SlotRequest) -> f64 {
    let mut ceiling = f64::INFINITY;

    if let Some(&goal) = request.targets.get(Nutrient::Calories) {
        if goal > 0.0 {
            ceiling = goal * SLOT_CALORIE_HEADROOM;
        }
    }
    if let Some(max) = request.target.limits.get(Nutrient::Calories).and_then(|l| l.max) {
        ceiling = ceiling.min((max - request.day.calories).max(0.0));
    }

    if ceiling.is_infinite() {
        // Unbounded: every choice of up to `max` foods must fit.
        let mut calories: Vec<f64> = candidates.iter().map(|f| f.calories).collect();
        calories.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        ceiling = calories.iter().take(request.cap.max).sum();
    }

    ceiling
}

/// 0/1 knapsack over calories and item count.
///
/// Calories are discretized into [`CALORIE_BUCKET`] wide buckets up to the
/// slot's calorie ceiling. Every `(count, bucket)` cell keeps the subset with
/// the lowest [`deviation`]; subsets that break a daily maximum are pruned.
/// The answer is the cheapest cell whose count lies within the slot cap,
/// preferring fewer items on ties.
pub fn knapsack_select<'a>(candidates: &[&'a FoodItem], request: &SlotRequest) -> Vec<&'a FoodItem> {
    let max_items = request.cap.max.min(candidates.len());
    if max_items == 0 {
        return Vec::new();
    }

    let ceiling = calorie_ceiling(candidates, request);
    let buckets = ((ceiling / CALORIE_BUCKET).floor() as usize).min(MAX_BUCKETS);

    let empty = NutrientTotals::default();
    let mut table: Vec<Vec<Option<Cell>>> = vec![vec![None; buckets + 1]; max_items + 1];
    table[0][0] = Some(Cell {
        items: Vec::new(),
        totals: empty,
        cost: deviation(&empty, &request.targets, request.target),
    });

    for (i, food) in candidates.iter().enumerate() {
        let weight = (food.calories / CALORIE_BUCKET).round() as usize;
        if weight > buckets {
            continue;
        }

        // Layers are visited top-down so each food is used at most once.
        for k in (0..max_items).rev() {
            for b in 0..=(buckets - weight) {
                let next = table[k][b].as_ref().and_then(|cell| {
                    let totals = cell.totals.add(food);
                    if !request.fits_day(&totals) {
                        return None;
                    }
                    let mut items = cell.items.clone();
                    items.push(i);
                    Some(Cell {
                        items,
                        totals,
                        cost: deviation(&totals, &request.targets, request.target),
                    })
                });

                if let Some(next) = next {
                    let slot = &mut table[k + 1][b + weight];
                    if slot.as_ref().is_none_or(|existing| next.cost < existing.cost) {
                        *slot = Some(next);
                    }
                }
            }
        }
    }

    let min_items = request.cap.min.min(max_items);
    let mut best: Option<&Cell> = None;
    for row in &table[min_items..=max_items] {
        for cell in row.iter().flatten() {
            if best.is_none_or(|b| cell.cost < b.cost) {
                best = Some(cell);
            }
        }
    }

    match best {
        Some(cell) => {
            debug!(
                "{}: knapsack picked {} item(s), deviation {:.3}",
                request.slot,
                cell.items.len(),
                cell.cost
            );
            cell.items.iter().map(|&i| candidates[i]).collect()
        }
        None => Vec::new(),
    }
}

/// Relative amount by which `totals` falls short of the daily minimum limits.
pub fn minimum_shortfall(target: &NutritionTarget, totals: &NutrientTotals) -> f64 {
    target
        .limits
        .iter()
        .filter_map(|(nutrient, limit)| {
            limit
                .min
                .filter(|&min| min > 0.0)
                .map(|min| (nutrient, min))
        })
        .map(|(nutrient, min)| (min - totals.get(nutrient)).max(0.0) / min)
        .sum()
}

/// Foods picked so far, per slot in day order.
type SlotPicks<'a> = Vec<(MealSlot, Vec<&'a FoodItem>)>;

/// Add a food to a slot, or replace the item at `replace`.
struct Move<'a> {
    slot: usize,
    replace: Option<usize>,
    food: &'a FoodItem,
    totals: NutrientTotals,
    /// Shortfall first, then deviation from the daily targets.
    rank: (f64, f64),
}

/// Top up a day that misses a minimum limit.
///
/// Slot-by-slot selection only sees each slot's share, so it can end below a
/// daily minimum while foods that would close the gap are still unused. Each
/// round applies the single add (slot has room) or swap that cuts the
/// shortfall the most without breaking a maximum limit, until the minimums
/// hold or nothing helps.
fn meet_minimums<'a>(
    foods: &'a [FoodItem],
    target: &NutritionTarget,
    caps: &SlotCaps,
    picks: &mut SlotPicks<'a>,
    used: &mut HashSet<String>,
    day: &mut NutrientTotals,
) {
    let rank = |totals: &NutrientTotals| {
        (
            minimum_shortfall(target, totals),
            deviation(totals, &target.targets, target),
        )
    };

    for _ in 0..foods.len() {
        let shortfall = minimum_shortfall(target, day);
        if shortfall <= 0.0 {
            return;
        }

        let mut best: Option<Move<'a>> = None;
        let mut consider = |candidate: Move<'a>| {
            if candidate.rank.0 < shortfall
                && best.as_ref().is_none_or(|b| candidate.rank < b.rank)
            {
                best = Some(candidate);
            }
        };

        for (index, (slot, items)) in picks.iter().enumerate() {
            let candidates = slot_candidates(foods, *slot, used);

            if items.len() < caps.get(*slot).max {
                for &food in &candidates {
                    let totals = day.add(food);
                    if within_max_limits(target, &totals) {
                        consider(Move {
                            slot: index,
                            replace: None,
                            food,
                            rank: rank(&totals),
                            totals,
                        });
                    }
                }
            }
            for (position, &old) in items.iter().enumerate() {
                for &food in &candidates {
                    let totals = day.remove(old).add(food);
                    if within_max_limits(target, &totals) {
                        consider(Move {
                            slot: index,
                            replace: Some(position),
                            food,
                            rank: rank(&totals),
                            totals,
                        });
                    }
                }
            }
        }

        let Some(step) = best else {
            debug!("No add or swap reduces the minimum shortfall {:.3}", shortfall);
            return;
        };

        let (slot, items) = &mut picks[step.slot];
        match step.replace {
            Some(position) => {
                debug!("{}: swap {} for {}", slot, items[position].name, step.food.name);
                used.remove(&items[position].key());
                items[position] = step.food;
            }
            None => {
                debug!("{}: add {}", slot, step.food.name);
                items.push(step.food);
            }
        }
        used.insert(step.food.key());
        *day = step.totals;
    }
}

/// Foods eligible for a slot: suitable meal time, not yet used today, and no
/// meat at breakfast.
fn slot_candidates<'a>(foods: &'a [FoodItem], slot: MealSlot, used: &HashSet<String>) -> Vec<&'a FoodItem> {
    let used: Vec<&String> = used.iter().collect();
    let mut predicates: Vec<Predicate> = vec![by_meal_time(slot), by_name_not_in(&used)];
    if slot == MealSlot::Breakfast {
        predicates.push(not_tag(MEAT_TAG));
    }
    filter_items(foods, &predicates)
}

/// Assign unslotted foods to slots.
///
/// Each food goes to the first suitable slot with free capacity (meat skips
/// breakfast). Failing that, any suitable slot with free capacity; failing
/// that, the least-filled suitable slot. Foods are never dropped; a food that
/// suits no slot at all is an error.
pub fn distribute_to_slots(foods: &[&FoodItem], caps: &SlotCaps) -> Result<MealPlan> {
    let mut plan = MealPlan::default();

    for &food in foods {
        let has_room = |plan: &MealPlan, slot: MealSlot| plan.slot(slot).len() < caps.get(slot).max;

        let preferred = MealSlot::ALL.into_iter().find(|&slot| {
            food.suits(slot)
                && !(slot == MealSlot::Breakfast && food.has_tag(MEAT_TAG))
                && has_room(&plan, slot)
        });
        let slot = preferred
            .or_else(|| {
                MealSlot::ALL
                    .into_iter()
                    .find(|&slot| food.suits(slot) && has_room(&plan, slot))
            })
            .or_else(|| {
                MealSlot::ALL
                    .into_iter()
                    .filter(|&slot| food.suits(slot))
                    .min_by_key(|&slot| plan.slot(slot).len())
            })
            .ok_or_else(|| {
                PlannerError::InvalidInput(format!("'{}' has no meal times", food.name))
            })?;

        plan.slot_mut(slot).push(food.clone());
    }

    Ok(plan)
}

/// Build the best daily plan for `target` from `foods`.
///
/// Input is validated before any optimization. Slots are filled in order
/// (breakfast, lunch, dinner, snack), each aiming at its share of the daily
/// targets while respecting the daily maximum limits accumulated so far. A
/// day that still misses a minimum limit is topped up with unused foods. The
/// result goes through [`MealPlanBuilder`], so slot caps and all limits are
/// enforced on the final plan.
pub fn find_optimal_plan(
    foods: &[FoodItem],
    target: &NutritionTarget,
    caps: &SlotCaps,
    strategy: Strategy,
) -> Result<MealPlan> {
    if foods.is_empty() {
        return Err(PlannerError::EmptyCatalog);
    }
    if let Some(food) = foods.iter().find(|f| !f.is_valid()) {
        return Err(PlannerError::InvalidInput(format!(
            "food '{}' needs a meal time and finite, non-negative nutrients",
            food.name
        )));
    }
    target.validate()?;
    caps.validate()?;

    info!(
        "Planning from {} foods with the {} strategy",
        foods.len(),
        strategy
    );

    let mut used: HashSet<String> = HashSet::new();
    let mut day = NutrientTotals::default();
    let mut picks: SlotPicks<'_> = Vec::new();

    for slot in MealSlot::ALL {
        let cap = caps.get(slot);
        if cap.max == 0 {
            continue;
        }

        let candidates = slot_candidates(foods, slot, &used);
        if candidates.is_empty() {
            debug!("{}: no candidates", slot);
            picks.push((slot, Vec::new()));
            continue;
        }

        let chosen: Vec<&FoodItem> = if target.has_targets() {
            let request = SlotRequest::new(slot, cap, target, day);
            match strategy {
                Strategy::Knapsack => knapsack_select(&candidates, &request),
                Strategy::Greedy => greedy_select(&candidates, &request),
            }
        } else {
            // Nothing to aim for: take foods in catalog order.
            let mut taken = Vec::new();
            let mut slot_totals = NutrientTotals::default();
            for food in candidates {
                if taken.len() >= cap.max {
                    break;
                }
                let after = slot_totals.add(food);
                if within_max_limits(target, &day.plus(&after)) {
                    taken.push(food);
                    slot_totals = after;
                }
            }
            taken
        };

        info!("{}: {} item(s)", slot, chosen.len());

        for &food in &chosen {
            used.insert(food.key());
            day = day.add(food);
        }
        picks.push((slot, chosen));
    }

    if minimum_shortfall(target, &day) > 0.0 {
        info!("Day is below a minimum limit; looking for unused foods to close the gap");
        meet_minimums(foods, target, caps, &mut picks, &mut used, &mut day);
    }

    let mut builder = MealPlanBuilder::new();
    builder.slot_caps(*caps);
    for (slot, items) in picks {
        for food in items {
            builder.add_to_slot(slot, food.clone())?;
        }
    }

    builder.build(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Limit;

    fn calorie_foods() -> Vec<FoodItem> {
        vec![
            FoodItem::new("A", 300.0, 0.0, 0.0, 0.0),
            FoodItem::new("B", 200.0, 0.0, 0.0, 0.0),
            FoodItem::new("C", 500.0, 0.0, 0.0, 0.0),
        ]
    }

    fn names(items: &[&FoodItem]) -> Vec<String> {
        items.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_score_perfect_match() {
        let target = NutritionTarget::new()
            .target(Nutrient::Calories, 400.0)
            .target(Nutrient::Protein, 20.0)
            .target(Nutrient::Fat, 10.0)
            .target(Nutrient::Carbs, 50.0);
        let food = FoodItem::new("Exact", 400.0, 20.0, 10.0, 50.0);
        let score = score_food(&food, &target.targets, &target);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_penalizes_overshoot() {
        let target = NutritionTarget::new()
            .target(Nutrient::Calories, 400.0)
            .target(Nutrient::Protein, 20.0)
            .target(Nutrient::Fat, 10.0)
            .target(Nutrient::Carbs, 50.0);
        let food = FoodItem::new("Double", 800.0, 40.0, 20.0, 100.0);
        let score = score_food(&food, &target.targets, &target);
        assert!((score + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_respects_weights() {
        let plain = NutritionTarget::new()
            .target(Nutrient::Calories, 500.0)
            .target(Nutrient::Protein, 30.0);
        let weighted = plain.clone().weighted(Nutrient::Protein, 3.0);
        let food = FoodItem::new("Lean", 250.0, 30.0, 2.0, 5.0);

        assert!(
            score_food(&food, &weighted.targets, &weighted) > score_food(&food, &plain.targets, &plain)
        );
    }

    #[test]
    fn test_deviation() {
        let target = NutritionTarget::new()
            .target(Nutrient::Calories, 500.0)
            .target(Nutrient::Protein, 20.0)
            .weighted(Nutrient::Protein, 2.0);
        let totals = NutrientTotals {
            calories: 400.0,
            protein: 25.0,
            fat: 100.0,
            carbs: 0.0,
        };
        // 100/500 + 2 * 5/20
        assert!((deviation(&totals, &target.targets, &target) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_knapsack_prefers_fewer_items_on_tie() {
        let foods = calorie_foods();
        let candidates: Vec<&FoodItem> = foods.iter().collect();
        let target = NutritionTarget::new().target(Nutrient::Calories, 2000.0);
        let request = SlotRequest::new(
            MealSlot::Breakfast,
            SlotCap::new(1, 2),
            &target,
            NutrientTotals::default(),
        );

        let chosen = knapsack_select(&candidates, &request);
        assert_eq!(names(&chosen), vec!["C"]);
    }

    #[test]
    fn test_knapsack_respects_remaining_daily_max() {
        let foods = calorie_foods();
        let candidates: Vec<&FoodItem> = foods.iter().collect();
        let target = NutritionTarget::new()
            .target(Nutrient::Calories, 2000.0)
            .limit(Nutrient::Calories, Limit::at_most(2200.0));
        let day = NutrientTotals {
            calories: 1900.0,
            ..Default::default()
        };
        let request = SlotRequest::new(MealSlot::Breakfast, SlotCap::new(1, 2), &target, day);

        let chosen = knapsack_select(&candidates, &request);
        assert_eq!(names(&chosen), vec!["A"]);
    }

    #[test]
    fn test_knapsack_combines_items() {
        let foods = vec![
            FoodItem::new("Toast", 150.0, 0.0, 0.0, 0.0),
            FoodItem::new("Eggs", 350.0, 0.0, 0.0, 0.0),
            FoodItem::new("Feast", 900.0, 0.0, 0.0, 0.0),
        ];
        let candidates: Vec<&FoodItem> = foods.iter().collect();
        let target = NutritionTarget::new().target(Nutrient::Calories, 2000.0);
        let request = SlotRequest::new(
            MealSlot::Breakfast,
            SlotCap::new(1, 2),
            &target,
            NutrientTotals::default(),
        );

        let chosen = knapsack_select(&candidates, &request);
        assert_eq!(names(&chosen), vec!["Toast", "Eggs"]);
    }

    #[test]
    fn test_knapsack_honors_min_items() {
        let foods = calorie_foods();
        let candidates: Vec<&FoodItem> = foods.iter().collect();
        let target = NutritionTarget::new().target(Nutrient::Calories, 2000.0);
        let request = SlotRequest::new(
            MealSlot::Breakfast,
            SlotCap::new(2, 2),
            &target,
            NutrientTotals::default(),
        );

        let chosen = knapsack_select(&candidates, &request);
        assert_eq!(names(&chosen), vec!["A", "B"]);
    }

    #[test]
    fn test_greedy_stops_when_not_improving() {
        let foods = calorie_foods();
        let candidates: Vec<&FoodItem> = foods.iter().collect();
        let target = NutritionTarget::new().target(Nutrient::Calories, 2000.0);
        let request = SlotRequest::new(
            MealSlot::Breakfast,
            SlotCap::new(1, 2),
            &target,
            NutrientTotals::default(),
        );

        let chosen = greedy_select(&candidates, &request);
        assert_eq!(names(&chosen), vec!["C"]);
    }

    #[test]
    fn test_greedy_skips_items_over_daily_max() {
        let foods = calorie_foods();
        let candidates: Vec<&FoodItem> = foods.iter().collect();
        let target = NutritionTarget::new()
            .target(Nutrient::Calories, 2000.0)
            .limit(Nutrient::Calories, Limit::at_most(2200.0));
        let day = NutrientTotals {
            calories: 1900.0,
            ..Default::default()
        };
        let request = SlotRequest::new(MealSlot::Breakfast, SlotCap::new(1, 2), &target, day);

        let chosen = greedy_select(&candidates, &request);
        assert_eq!(names(&chosen), vec!["A"]);
    }

    #[test]
    fn test_distribute_to_slots() {
        let foods = vec![
            FoodItem::new("Bacon", 250.0, 12.0, 20.0, 1.0).with_tags(["meat"]),
            FoodItem::new("Toast", 80.0, 3.0, 1.0, 15.0).with_meal_times([MealSlot::Breakfast]),
            FoodItem::new("Soup", 120.0, 6.0, 4.0, 14.0)
                .with_meal_times([MealSlot::Lunch, MealSlot::Dinner]),
            FoodItem::new("Steak", 600.0, 50.0, 40.0, 0.0)
                .with_meal_times([MealSlot::Dinner])
                .with_tags(["meat"]),
        ];
        let refs: Vec<&FoodItem> = foods.iter().collect();

        let plan = distribute_to_slots(&refs, &SlotCaps::default()).unwrap();
        let slot_names = |slot| plan.slot(slot).iter().map(|f| f.name.as_str()).collect::<Vec<_>>();

        assert_eq!(slot_names(MealSlot::Breakfast), vec!["Toast"]);
        assert_eq!(slot_names(MealSlot::Lunch), vec!["Bacon", "Soup"]);
        assert_eq!(slot_names(MealSlot::Dinner), vec!["Steak"]);
        assert!(plan.snacks.is_empty());
    }

    #[test]
    fn test_distribute_overflows_to_least_filled_slot() {
        let foods: Vec<FoodItem> = (0..3)
            .map(|i| FoodItem::new(format!("Cereal {i}"), 200.0, 5.0, 2.0, 40.0).with_meal_times([MealSlot::Breakfast]))
            .collect();
        let refs: Vec<&FoodItem> = foods.iter().collect();

        let plan = distribute_to_slots(&refs, &SlotCaps::default()).unwrap();
        assert_eq!(plan.breakfast.len(), 3);
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_distribute_rejects_food_without_meal_times() {
        let foods = vec![
            FoodItem::new("Toast", 80.0, 3.0, 1.0, 15.0),
            FoodItem::new("Mystery", 100.0, 1.0, 1.0, 1.0).with_meal_times([]),
        ];
        let refs: Vec<&FoodItem> = foods.iter().collect();

        match distribute_to_slots(&refs, &SlotCaps::default()) {
            Err(PlannerError::InvalidInput(msg)) => assert!(msg.contains("Mystery")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_minimum_shortfall() {
        let target = NutritionTarget::new()
            .limit(Nutrient::Calories, Limit::between(2000.0, 2500.0))
            .limit(Nutrient::Protein, Limit::new(Some(100.0), None))
            .limit(Nutrient::Fat, Limit::at_most(80.0));
        let totals = NutrientTotals {
            calories: 1500.0,
            protein: 120.0,
            fat: 200.0,
            carbs: 0.0,
        };
        // 500/2000; protein is met and fat has no minimum.
        assert!((minimum_shortfall(&target, &totals) - 0.25).abs() < 1e-9);
        assert_eq!(minimum_shortfall(&NutritionTarget::new(), &totals), 0.0);
    }

    #[test]
    fn test_meet_minimums_adds_then_stops_at_max() {
        let foods = vec![
            FoodItem::new("Rice", 400.0, 8.0, 1.0, 88.0).with_meal_times([MealSlot::Lunch]),
            FoodItem::new("Bread", 300.0, 9.0, 3.0, 55.0).with_meal_times([MealSlot::Lunch]),
            FoodItem::new("Cake", 900.0, 5.0, 45.0, 110.0).with_meal_times([MealSlot::Lunch]),
        ];
        let target = NutritionTarget::new()
            .target(Nutrient::Calories, 700.0)
            .limit(Nutrient::Calories, Limit::between(650.0, 800.0));
        let mut caps = SlotCaps::default();
        caps.set(MealSlot::Lunch, SlotCap::new(1, 3));

        let mut picks: SlotPicks<'_> = vec![(MealSlot::Lunch, vec![&foods[0]])];
        let mut used: HashSet<String> = ["rice".to_string()].into_iter().collect();
        let mut day = NutrientTotals::of([&foods[0]]);

        meet_minimums(&foods, &target, &caps, &mut picks, &mut used, &mut day);

        // Cake would overshoot the maximum; Bread closes the gap.
        assert_eq!(names(&picks[0].1), vec!["Rice", "Bread"]);
        assert_eq!(day.calories, 700.0);
        assert!(used.contains("bread"));
    }

    #[test]
    fn test_meet_minimums_swaps_when_slot_is_full() {
        let foods = vec![
            FoodItem::new("Salad", 150.0, 4.0, 2.0, 10.0).with_meal_times([MealSlot::Dinner]),
            FoodItem::new("Lasagna", 650.0, 30.0, 25.0, 60.0).with_meal_times([MealSlot::Dinner]),
        ];
        let target = NutritionTarget::new()
            .target(Nutrient::Calories, 600.0)
            .limit(Nutrient::Calories, Limit::between(500.0, 700.0));
        let mut caps = SlotCaps::default();
        caps.set(MealSlot::Dinner, SlotCap::new(1, 1));

        let mut picks: SlotPicks<'_> = vec![(MealSlot::Dinner, vec![&foods[0]])];
        let mut used: HashSet<String> = ["salad".to_string()].into_iter().collect();
        let mut day = NutrientTotals::of([&foods[0]]);

        meet_minimums(&foods, &target, &caps, &mut picks, &mut used, &mut day);

        assert_eq!(names(&picks[0].1), vec!["Lasagna"]);
        assert!(!used.contains("salad"));
        assert_eq!(day.calories, 650.0);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Greedy".parse::<Strategy>().unwrap(), Strategy::Greedy);
        assert_eq!("dp".parse::<Strategy>().unwrap(), Strategy::Knapsack);
        assert!("random".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::Knapsack);
    }
}
