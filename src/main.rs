use clap::Parser;
use std::path::Path;
use tracing::{info, warn};

use meal_planner_rs::catalog::{load_foods, save_foods, FoodCatalog};
use meal_planner_rs::cli::{Cli, Command, PlanArgs};
use meal_planner_rs::config::{high_protein_preset, PlannerConfig};
use meal_planner_rs::error::{PlannerError, Result};
use meal_planner_rs::interface::{
    collect_plan_request, display_food_list, display_fulfillment, display_meal_plan,
    display_plan_hints, display_plan_report, display_targets, plan_json,
};
use meal_planner_rs::logging::init_logging;
use meal_planner_rs::models::{FoodItem, MealPlan, MealSlot, Nutrient, NutritionTarget, SlotCaps};
use meal_planner_rs::planner::{
    by_meal_time, by_tag, closest_combination, compose, distribute_to_slots, find_optimal_plan,
    not_tag, Predicate, Strategy,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = PlannerConfig::discover(cli.config.as_deref())?;
    init_logging(cli.verbose, config.log_level.as_deref());

    let catalog_path = config.catalog_path(cli.catalog.as_deref());
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan(args) => cmd_plan(&catalog_path, &config, &args),
        Command::Interactive => cmd_interactive(&catalog_path, &config),
        Command::Demo { strategy } => {
            cmd_demo(&catalog_path, strategy.unwrap_or(config.strategy))
        }
        Command::Foods { slot, tag, export } => {
            cmd_foods(&catalog_path, slot, tag.as_deref(), export.as_deref())
        }
        Command::Quick {
            calories,
            max_items,
        } => cmd_quick(&catalog_path, calories, max_items),
    }
}

fn load_catalog(path: &Path) -> Result<FoodCatalog> {
    let catalog = FoodCatalog::new(load_foods(path)?);
    if catalog.is_empty() {
        return Err(PlannerError::EmptyCatalog);
    }
    Ok(catalog)
}

/// Plan, printing hints when the result cannot satisfy the caps or limits.
fn plan_with_hints(
    foods: &[FoodItem],
    target: &NutritionTarget,
    caps: &SlotCaps,
    strategy: Strategy,
) -> Result<MealPlan> {
    match find_optimal_plan(foods, target, caps, strategy) {
        Ok(plan) => Ok(plan),
        Err(
            e @ (PlannerError::LimitViolated { .. }
            | PlannerError::SlotTooFew { .. }
            | PlannerError::SlotTooMany { .. }),
        ) => {
            display_plan_hints();
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Plan a day from flags layered over the config file.
fn cmd_plan(catalog_path: &Path, config: &PlannerConfig, args: &PlanArgs) -> Result<()> {
    let catalog = load_catalog(catalog_path)?.without(&args.exclude_foods)?;

    let mut predicates: Vec<Predicate> = args.tags.iter().map(|t| by_tag(t)).collect();
    predicates.extend(args.exclude_tags.iter().map(|t| not_tag(t)));
    let tag_filter = compose(predicates);
    let foods: Vec<FoodItem> = catalog.filtered(&[tag_filter]).into_iter().cloned().collect();
    info!("{} of {} foods pass the tag filters", foods.len(), catalog.len());

    let target = args
        .apply_to(config.nutrition_target())
        .with_default_calorie_limit();
    if !target.has_targets() {
        warn!("No targets set; filling slots in catalog order");
    }
    let caps = args.apply_slots(config.slots);
    let strategy = args.strategy.unwrap_or(config.strategy);

    let plan = plan_with_hints(&foods, &target, &caps, strategy)?;

    if args.json {
        println!("{}", plan_json(&plan, &target)?);
    } else {
        display_plan_report(&plan, &target);
    }
    Ok(())
}

/// Prompt for targets and plan a day.
fn cmd_interactive(catalog_path: &Path, config: &PlannerConfig) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    println!("Loaded {} foods from {}", catalog.len(), catalog_path.display());
    println!();

    let request = collect_plan_request(
        &catalog,
        &config.nutrition_target(),
        config.slots,
        config.strategy,
    )?;
    let catalog = catalog.without(&request.excluded)?;
    let target = request.target.with_default_calorie_limit();

    println!();
    display_targets(&target, &request.caps);

    let plan = plan_with_hints(catalog.foods(), &target, &request.caps, request.strategy)?;
    display_plan_report(&plan, &target);
    Ok(())
}

fn cmd_demo(catalog_path: &Path, strategy: Strategy) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let (target, caps) = high_protein_preset();

    println!("High-protein demo ({} strategy)", strategy);
    println!();
    display_targets(&target, &caps);

    let plan = plan_with_hints(catalog.foods(), &target, &caps, strategy)?;
    display_plan_report(&plan, &target);
    display_fulfillment(&plan.totals(), &target, Nutrient::Protein);
    Ok(())
}

fn cmd_foods(
    catalog_path: &Path,
    slot: Option<MealSlot>,
    tag: Option<&str>,
    export: Option<&Path>,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let mut predicates: Vec<Predicate> = Vec::new();
    let mut title = String::from("Foods");
    if let Some(slot) = slot {
        predicates.push(by_meal_time(slot));
        title.push_str(&format!(" for {}", slot));
    }
    if let Some(tag) = tag {
        predicates.push(by_tag(tag));
        title.push_str(&format!(" tagged '{}'", tag));
    }

    let foods = catalog.filtered(&predicates);
    display_food_list(&foods, &title);

    if let Some(path) = export {
        let owned: Vec<FoodItem> = foods.into_iter().cloned().collect();
        save_foods(path, &owned)?;
        println!("Wrote {} foods to {}", owned.len(), path.display());
    }
    Ok(())
}

/// Closest-calorie combination, spread over the day.
fn cmd_quick(catalog_path: &Path, calories: f64, max_items: usize) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let combination = closest_combination(catalog.foods(), calories, max_items)?;

    let plan = distribute_to_slots(&combination, &SlotCaps::default())?;
    display_meal_plan(&plan);

    let total = plan.totals().calories;
    println!(
        "Target {:.0} kcal, combination {:.0} kcal (difference {:.0})",
        calories,
        total,
        (total - calories).abs()
    );
    Ok(())
}
