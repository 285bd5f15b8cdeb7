use serde::Serialize;

use crate::error::Result;
use crate::models::{FoodItem, MealPlan, MealSlot, Nutrient, NutrientTotals, NutritionTarget, SlotCaps};
use crate::planner::{compare_to_targets, fulfillment_pct, TargetComparison};

fn name_width<'a>(items: impl Iterator<Item = &'a FoodItem>) -> usize {
    items.map(|f| f.name.len()).max().unwrap_or(10).max(10)
}

/// Display a meal plan slot by slot, with totals.
pub fn display_meal_plan(plan: &MealPlan) {
    if plan.is_empty() {
        println!("No meal plan generated (no suitable foods).");
        return;
    }

    println!();
    println!("=== Meal Plan ===");

    let width = name_width(plan.all_items());

    for slot in MealSlot::ALL {
        let items = plan.slot(slot);
        if items.is_empty() {
            continue;
        }

        println!();
        println!("{}:", slot.heading());
        for item in items {
            println!(
                "  - {:<width$} {:>5.0} kcal | P {:>5.1} g  F {:>5.1} g  C {:>5.1} g",
                item.name,
                item.calories,
                item.protein,
                item.fat,
                item.carbs,
                width = width
            );
        }

        let totals = NutrientTotals::of(items);
        println!(
            "    {:<width$} {:>5.0} kcal",
            "subtotal",
            totals.calories,
            width = width
        );
    }

    display_totals(&plan.totals(), plan.len());
}

pub fn display_totals(totals: &NutrientTotals, items: usize) {
    println!();
    println!("--- Totals ({} items) ---", items);
    for nutrient in Nutrient::ALL {
        println!(
            "{:<9} {:>7.1} {}",
            nutrient.as_str(),
            totals.get(nutrient),
            nutrient.unit()
        );
    }
    println!();
}

/// Display per-nutrient actual vs. target rows with status markers.
pub fn display_comparison(rows: &[TargetComparison]) {
    if rows.is_empty() {
        return;
    }

    println!("--- Compared to targets ---");
    for row in rows {
        let sign = if row.diff >= 0.0 { "+" } else { "" };
        println!(
            "{} {:<9} {:>7.1} / {:>7.1} {:<4} ({}{:.1}, {}{:.1}%)",
            row.status.marker(),
            row.nutrient.as_str(),
            row.actual,
            row.target,
            row.nutrient.unit(),
            sign,
            row.diff,
            sign,
            row.diff_pct
        );
    }
    println!();
}

/// Display one nutrient's fulfilment, e.g. protein in the demo.
pub fn display_fulfillment(totals: &NutrientTotals, target: &NutritionTarget, nutrient: Nutrient) {
    if let Some(pct) = fulfillment_pct(totals, target, nutrient) {
        println!("{} fulfilment: {:.1}%", nutrient, pct);
        println!();
    }
}

/// Display targets, weights, limits and slot sizes before planning.
pub fn display_targets(target: &NutritionTarget, caps: &SlotCaps) {
    println!("=== Targets ===");
    for nutrient in Nutrient::ALL {
        let goal = target
            .targets
            .get(nutrient)
            .map(|v| format!("{:.0} {}", v, nutrient.unit()))
            .unwrap_or_else(|| "-".to_string());
        let limit = match target.limits.get(nutrient) {
            Some(l) => format!(
                "[{} .. {}]",
                l.min.map(|v| format!("{:.0}", v)).unwrap_or_default(),
                l.max.map(|v| format!("{:.0}", v)).unwrap_or_default()
            ),
            None => String::new(),
        };
        println!(
            "{:<9} {:>10}  weight {:.1}  {}",
            nutrient.as_str(),
            goal,
            target.weight(nutrient),
            limit
        );
    }
    let slots: Vec<String> = MealSlot::ALL
        .iter()
        .map(|&slot| {
            let cap = caps.get(slot);
            format!("{} {}-{}", slot, cap.min, cap.max)
        })
        .collect();
    println!("Items per meal: {}", slots.join(", "));
    println!();
}

/// Display a simple list of foods with their details.
pub fn display_food_list(foods: &[&FoodItem], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        let slots: Vec<&str> = food.meal_times.iter().map(|s| s.as_str()).collect();
        let tags: Vec<&str> = food.tags.iter().map(String::as_str).collect();
        println!(
            "  {} - {:.0} kcal, P:{} F:{} C:{} [{}]{}",
            food.name,
            food.calories,
            food.protein,
            food.fat,
            food.carbs,
            slots.join("/"),
            if tags.is_empty() {
                String::new()
            } else {
                format!(" #{}", tags.join(" #"))
            }
        );
    }

    println!();
}

/// Suggestions printed after a plan could not be built.
pub fn display_plan_hints() {
    eprintln!("Could not build a plan that meets every limit. Try:");
    eprintln!("  - loosening or removing limits (--limit, [limits] in the config)");
    eprintln!("  - allowing more items per meal (--slot)");
    eprintln!("  - adding foods to the catalog or dropping tag filters");
    eprintln!("  - adjusting the targets");
}

#[derive(Serialize)]
struct PlanReport<'a> {
    plan: &'a MealPlan,
    totals: NutrientTotals,
    comparison: Vec<TargetComparison>,
}

/// The plan, its totals and the target comparison as pretty JSON.
pub fn plan_json(plan: &MealPlan, target: &NutritionTarget) -> Result<String> {
    let totals = plan.totals();
    let report = PlanReport {
        plan,
        totals,
        comparison: compare_to_targets(&totals, target),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Display a plan with totals and the target comparison.
pub fn display_plan_report(plan: &MealPlan, target: &NutritionTarget) {
    display_meal_plan(plan);
    if !plan.is_empty() {
        display_comparison(&compare_to_targets(&plan.totals(), target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_json() {
        let plan = MealPlan {
            breakfast: vec![FoodItem::new("Oats", 300.0, 10.0, 5.0, 50.0)],
            lunch: vec![FoodItem::new("Soup", 200.0, 8.0, 4.0, 20.0)],
            ..Default::default()
        };
        let target = NutritionTarget::new().target(Nutrient::Calories, 500.0);

        let json = plan_json(&plan, &target).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["plan"]["breakfast"][0]["name"], "Oats");
        assert_eq!(value["totals"]["calories"], 500.0);
        assert_eq!(value["comparison"][0]["nutrient"], "calories");
        assert_eq!(value["comparison"][0]["status"], "on_track");
    }
}
