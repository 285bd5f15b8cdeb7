use dialoguer::{Confirm, Input, Select};

use crate::catalog::FoodCatalog;
use crate::error::Result;
use crate::interface::parse::{parse_bounds, parse_slot_cap};
use crate::models::{MealSlot, Nutrient, NutritionTarget, SlotCaps};
use crate::planner::Strategy;

/// Most catalog matches offered when an excluded name is misspelled.
const MAX_SUGGESTIONS: usize = 5;

fn check_number(input: &str) -> std::result::Result<(), String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(());
    }
    match input.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
        _ => Err("Enter a non-negative number or leave empty".to_string()),
    }
}

/// Prompt for a number; empty input means "not set".
pub fn prompt_optional_number(prompt: &str, default: Option<f64>) -> Result<Option<f64>> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|s: &String| check_number(s));
    if let Some(value) = default {
        input = input.default(format!("{}", value));
    }

    let answer = input.interact_text()?;
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        None
    } else {
        answer.parse().ok()
    })
}

/// Prompt for a target and weight per nutrient, starting from `defaults`.
pub fn prompt_targets(defaults: &NutritionTarget) -> Result<NutritionTarget> {
    let mut target = defaults.clone();

    println!("Daily targets (leave empty to skip a nutrient):");
    for nutrient in Nutrient::ALL {
        let value = prompt_optional_number(
            &format!("  {} ({})", nutrient, nutrient.unit()),
            defaults.targets.get(nutrient).copied(),
        )?;
        target.targets.set(nutrient, value);

        if value.is_some() {
            let weight = prompt_optional_number(
                &format!("  {} weight", nutrient),
                Some(defaults.weight(nutrient)),
            )?;
            target.weights.set(nutrient, weight);
        }
    }

    Ok(target)
}

/// Prompt for `min,max` limits per nutrient; empty keeps the current limit.
pub fn prompt_limits(target: &mut NutritionTarget) -> Result<()> {
    println!("Daily limits as 'min,max' (either side may be empty):");
    for nutrient in Nutrient::ALL {
        let answer: String = Input::new()
            .with_prompt(format!("  {} limit", nutrient))
            .allow_empty(true)
            .validate_with(|s: &String| {
                if s.trim().is_empty() {
                    Ok(())
                } else {
                    parse_bounds(s).map(|_| ())
                }
            })
            .interact_text()?;

        if !answer.trim().is_empty() {
            if let Ok(limit) = parse_bounds(&answer) {
                target.limits.set(nutrient, Some(limit));
            }
        }
    }
    Ok(())
}

/// Prompt for item counts per slot.
pub fn prompt_slot_caps(defaults: SlotCaps) -> Result<SlotCaps> {
    let mut caps = defaults;

    println!("Items per meal as 'min,max' (Enter keeps the default):");
    for slot in MealSlot::ALL {
        let current = defaults.get(slot);
        let answer: String = Input::new()
            .with_prompt(format!("  {} [{},{}]", slot.heading(), current.min, current.max))
            .allow_empty(true)
            .validate_with(|s: &String| parse_slot_cap(s, current).map(|_| ()))
            .interact_text()?;

        if let Ok(cap) = parse_slot_cap(&answer, current) {
            caps.set(slot, cap);
        }
    }
    Ok(caps)
}

pub fn prompt_strategy(default: Strategy) -> Result<Strategy> {
    let options = [Strategy::Knapsack, Strategy::Greedy];
    let labels = [
        "knapsack (closest fit, slower)",
        "greedy (fast, best single items first)",
    ];
    let selection = Select::new()
        .with_prompt("Selection strategy")
        .items(&labels)
        .default(options.iter().position(|s| *s == default).unwrap_or(0))
        .interact()?;
    Ok(options[selection])
}

/// Prompt for foods to leave out, matching names fuzzily against the catalog.
pub fn prompt_excluded_foods(catalog: &FoodCatalog) -> Result<Vec<String>> {
    let mut excluded = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Food to exclude (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        if let Some(food) = catalog.get(input) {
            excluded.push(food.name.clone());
            println!("Excluded: {}", food.name);
            continue;
        }

        let candidates: Vec<&str> = catalog
            .suggestions(input, MAX_SUGGESTIONS)
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();

        match candidates.len() {
            0 => println!("No matching food found for '{}'", input),
            1 => {
                let name = candidates[0];
                if prompt_yes_no(&format!("Did you mean '{}'?", name), true)? {
                    excluded.push(name.to_string());
                    println!("Excluded: {}", name);
                }
            }
            _ => {
                let mut options = candidates;
                let shown = options.len();
                options.push("None of these");

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&options)
                    .default(0)
                    .interact()?;

                if selection < shown {
                    excluded.push(options[selection].to_string());
                    println!("Excluded: {}", options[selection]);
                }
            }
        }
    }

    Ok(excluded)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Everything the interactive session asks for.
pub struct PlanRequest {
    pub target: NutritionTarget,
    pub caps: SlotCaps,
    pub strategy: Strategy,
    pub excluded: Vec<String>,
}

/// Run the full prompt sequence, seeded with configured defaults.
pub fn collect_plan_request(
    catalog: &FoodCatalog,
    defaults: &NutritionTarget,
    caps: SlotCaps,
    strategy: Strategy,
) -> Result<PlanRequest> {
    let mut target = prompt_targets(defaults)?;
    if prompt_yes_no("Set daily limits?", false)? {
        prompt_limits(&mut target)?;
    }
    let caps = if prompt_yes_no("Change items per meal?", false)? {
        prompt_slot_caps(caps)?
    } else {
        caps
    };
    let strategy = prompt_strategy(strategy)?;
    let excluded = if prompt_yes_no("Exclude any foods?", false)? {
        prompt_excluded_foods(catalog)?
    } else {
        Vec::new()
    };

    Ok(PlanRequest {
        target,
        caps,
        strategy,
        excluded,
    })
}
