pub mod parse;
pub mod prompts;
pub mod render;

pub use prompts::{
    collect_plan_request, prompt_excluded_foods, prompt_limits, prompt_optional_number,
    prompt_slot_caps, prompt_strategy, prompt_targets, prompt_yes_no, PlanRequest,
};
pub use render::{
    display_comparison, display_food_list, display_fulfillment, display_meal_plan,
    display_plan_hints, display_plan_report, display_targets, display_totals, plan_json,
};
