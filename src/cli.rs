use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::interface::parse::{parse_limit, parse_slot, parse_weight};
use crate::models::{Limit, MealSlot, Nutrient, NutrientMap, NutritionTarget, SlotCap, SlotCaps};
use crate::planner::{Strategy, DEFAULT_COMBINATION_ITEMS};

/// Meal planner: pick foods for a day that hit your nutrition targets.
#[derive(Parser, Debug)]
#[command(name = "meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Food catalog (CSV, or JSON with a .json extension).
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// TOML config file [default: meal_planner.toml if present].
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a day from targets given as flags (and the config file).
    Plan(PlanArgs),

    /// Enter targets, limits and slot sizes at prompts.
    Interactive,

    /// Plan a high-protein day from a built-in preset.
    Demo {
        #[arg(long)]
        strategy: Option<Strategy>,
    },

    /// List foods in the catalog.
    Foods {
        /// Only foods suitable for this slot.
        #[arg(long)]
        slot: Option<MealSlot>,

        /// Only foods with this tag.
        #[arg(long)]
        tag: Option<String>,

        /// Write the listed foods to a JSON catalog.
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },

    /// Find the food combination closest to a calorie total.
    Quick {
        calories: f64,

        /// Largest combination to try.
        #[arg(long, default_value_t = DEFAULT_COMBINATION_ITEMS)]
        max_items: usize,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Interactive
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct PlanArgs {
    #[arg(long)]
    pub calories: Option<f64>,

    #[arg(long)]
    pub protein: Option<f64>,

    #[arg(long)]
    pub fat: Option<f64>,

    #[arg(long)]
    pub carbs: Option<f64>,

    /// Importance of a nutrient, e.g. `protein=2.5`. Repeatable.
    #[arg(long = "weight", value_name = "NUTRIENT=WEIGHT", value_parser = parse_weight)]
    pub weights: Vec<(Nutrient, f64)>,

    /// Daily bounds, e.g. `fat=,90` or `calories=1800,2200`. Repeatable.
    #[arg(long = "limit", value_name = "NUTRIENT=MIN,MAX", value_parser = parse_limit)]
    pub limits: Vec<(Nutrient, Limit)>,

    /// Item counts for a slot, e.g. `snack=0,1`. Repeatable.
    #[arg(long = "slot", value_name = "SLOT=MIN,MAX", value_parser = parse_slot)]
    pub slots: Vec<(MealSlot, SlotCap)>,

    #[arg(long)]
    pub strategy: Option<Strategy>,

    /// Only use foods with this tag. Repeatable.
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Never use foods with this tag. Repeatable.
    #[arg(long = "exclude-tag")]
    pub exclude_tags: Vec<String>,

    /// Never use this food. Repeatable.
    #[arg(long = "exclude-food")]
    pub exclude_foods: Vec<String>,

    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

impl PlanArgs {
    /// Overlay the flags on a base target (usually from the config file).
    pub fn apply_to(&self, mut base: NutritionTarget) -> NutritionTarget {
        base.targets.merge(NutrientMap {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
        });
        for &(nutrient, weight) in &self.weights {
            base.weights.set(nutrient, Some(weight));
        }
        for &(nutrient, limit) in &self.limits {
            base.limits.set(nutrient, Some(limit));
        }
        base
    }

    pub fn apply_slots(&self, mut caps: SlotCaps) -> SlotCaps {
        for &(slot, cap) in &self.slots {
            caps.set(slot, cap);
        }
        caps
    }
}
