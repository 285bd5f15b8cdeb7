pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;

pub use error::{PlannerError, Result};
pub use models::{FoodItem, MealPlan};
