pub mod analysis;
pub mod builder;
pub mod combination;
pub mod constants;
pub mod filters;
pub mod optimizer;

pub use analysis::{compare_to_targets, fulfillment_pct, Status, TargetComparison};
pub use builder::MealPlanBuilder;
pub use combination::closest_combination;
pub use constants::*;
pub use filters::{
    by_meal_time, by_name_not_in, by_tag, compose, filter_items, max_nutrient, min_nutrient,
    not_tag, Predicate,
};
pub use optimizer::{
    deviation, distribute_to_slots, find_optimal_plan, greedy_select, knapsack_select,
    score_food, slot_targets, SlotRequest, Strategy,
};
