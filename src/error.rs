use thiserror::Error;

use crate::models::{MealSlot, Nutrient};

#[derive(Debug, Error)]
pub enum PlannerError {
    /// `hint` is empty or a " (did you mean ...?)" suffix.
    #[error("Food not found: {name}{hint}")]
    FoodNotFound { name: String, hint: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Food catalog is empty")]
    EmptyCatalog,

    #[error("'{food}' is not suitable for {slot}")]
    UnsuitableSlot { food: String, slot: MealSlot },

    #[error("{slot}: too few items ({count} < {min})")]
    SlotTooFew {
        slot: MealSlot,
        count: usize,
        min: usize,
    },

    #[error("{slot}: too many items ({count} > {max})")]
    SlotTooMany {
        slot: MealSlot,
        count: usize,
        max: usize,
    },

    #[error("{nutrient}: {value:.1} {bound}")]
    LimitViolated {
        nutrient: Nutrient,
        value: f64,
        bound: String,
    },

    #[error("No food combination found: {0}")]
    NoCombination(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
