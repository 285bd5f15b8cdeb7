use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// A tracked nutritional quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    Carbs,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carbs => "carbs",
        }
    }

    /// Display unit.
    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            _ => "g",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nutrient {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calories" | "kcal" => Ok(Nutrient::Calories),
            "protein" => Ok(Nutrient::Protein),
            "fat" | "fats" => Ok(Nutrient::Fat),
            "carbs" | "carbohydrates" => Ok(Nutrient::Carbs),
            other => Err(PlannerError::InvalidInput(format!(
                "unknown nutrient '{}'",
                other
            ))),
        }
    }
}

/// One of the four daily meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    /// Slots in the order they are planned and displayed.
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }

    /// Heading used when rendering a plan.
    pub fn heading(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snacks",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" | "snacks" => Ok(MealSlot::Snack),
            other => Err(PlannerError::InvalidInput(format!(
                "unknown meal time '{}'",
                other
            ))),
        }
    }
}

/// An optional value per nutrient.
///
/// Serializes as a table keyed by nutrient name, so it reads naturally in
/// TOML and JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NutrientMap<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<T>,
}

impl<T> Default for NutrientMap<T> {
    fn default() -> Self {
        Self {
            calories: None,
            protein: None,
            fat: None,
            carbs: None,
        }
    }
}

impl<T> NutrientMap<T> {
    pub fn get(&self, nutrient: Nutrient) -> Option<&T> {
        match nutrient {
            Nutrient::Calories => self.calories.as_ref(),
            Nutrient::Protein => self.protein.as_ref(),
            Nutrient::Fat => self.fat.as_ref(),
            Nutrient::Carbs => self.carbs.as_ref(),
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: Option<T>) {
        match nutrient {
            Nutrient::Calories => self.calories = value,
            Nutrient::Protein => self.protein = value,
            Nutrient::Fat => self.fat = value,
            Nutrient::Carbs => self.carbs = value,
        }
    }

    /// Set entries in `Nutrient::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, &T)> {
        Nutrient::ALL
            .into_iter()
            .filter_map(move |n| self.get(n).map(|v| (n, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn contains(&self, nutrient: Nutrient) -> bool {
        self.get(nutrient).is_some()
    }

    /// Overlay `other` on top of `self`; set entries in `other` win.
    pub fn merge(&mut self, other: NutrientMap<T>) {
        let NutrientMap {
            calories,
            protein,
            fat,
            carbs,
        } = other;
        if calories.is_some() {
            self.calories = calories;
        }
        if protein.is_some() {
            self.protein = protein;
        }
        if fat.is_some() {
            self.fat = fat;
        }
        if carbs.is_some() {
            self.carbs = carbs;
        }
    }
}
