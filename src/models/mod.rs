pub mod food;
pub mod nutrient;
pub mod plan;
pub mod target;

pub use food::FoodItem;
pub use nutrient::{MealSlot, Nutrient, NutrientMap};
pub use plan::{MealPlan, NutrientTotals};
pub use target::{
    Limit, NutritionTarget, SlotCap, SlotCaps, DEFAULT_CALORIE_TOLERANCE, DEFAULT_WEIGHT,
};
