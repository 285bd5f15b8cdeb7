use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::nutrient::{MealSlot, Nutrient};

fn all_meal_times() -> BTreeSet<MealSlot> {
    MealSlot::ALL.into_iter().collect()
}

/// A food item with per-unit nutritional values.
///
/// `meal_times` lists the slots the food may be served in; it defaults to
/// every slot. Tags are stored lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,

    pub calories: f64,

    pub protein: f64,

    pub fat: f64,

    pub carbs: f64,

    #[serde(default = "all_meal_times")]
    pub meal_times: BTreeSet<MealSlot>,

    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl FoodItem {
    /// Create a food that suits every slot and carries no tags.
    pub fn new(name: impl Into<String>, calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            protein,
            fat,
            carbs,
            meal_times: all_meal_times(),
            tags: BTreeSet::new(),
        }
    }

    /// Restrict the food to the given slots.
    pub fn with_meal_times(mut self, slots: impl IntoIterator<Item = MealSlot>) -> Self {
        self.meal_times = slots.into_iter().collect();
        self
    }

    pub fn with_tags<S: AsRef<str>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    #[inline]
    pub fn nutrient_value(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbs => self.carbs,
        }
    }

    #[inline]
    pub fn suits(&self, slot: MealSlot) -> bool {
        self.meal_times.contains(&slot)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_lowercase())
    }

    /// Non-empty name, at least one meal time, finite non-negative nutrients.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.meal_times.is_empty()
            && Nutrient::ALL.iter().all(|&n| {
                let v = self.nutrient_value(n);
                v.is_finite() && v >= 0.0
            })
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: {} kcal, P:{} F:{} C:{}",
            self.name, self.calories, self.protein, self.fat, self.carbs
        )
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PartialEq for FoodItem {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FoodItem {}

impl std::hash::Hash for FoodItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_food() -> FoodItem {
        FoodItem::new("Oatmeal", 150.0, 5.0, 3.0, 27.0)
            .with_meal_times([MealSlot::Breakfast, MealSlot::Snack])
            .with_tags(["Vegan", " grain "])
    }

    #[test]
    fn test_nutrient_value() {
        let food = sample_food();
        assert_eq!(food.nutrient_value(Nutrient::Calories), 150.0);
        assert_eq!(food.nutrient_value(Nutrient::Protein), 5.0);
        assert_eq!(food.nutrient_value(Nutrient::Fat), 3.0);
        assert_eq!(food.nutrient_value(Nutrient::Carbs), 27.0);
    }

    #[test]
    fn test_meal_times_and_tags() {
        let food = sample_food();
        assert!(food.suits(MealSlot::Breakfast));
        assert!(!food.suits(MealSlot::Dinner));
        assert!(food.has_tag("vegan"));
        assert!(food.has_tag("GRAIN"));
        assert!(!food.has_tag("meat"));
    }

    #[test]
    fn test_defaults_to_all_meal_times() {
        let food = FoodItem::new("Rice", 130.0, 2.7, 0.3, 28.0);
        assert_eq!(food.meal_times.len(), 4);
        assert!(food.tags.is_empty());
    }

    #[test]
    fn test_is_valid() {
        assert!(sample_food().is_valid());

        let mut negative = sample_food();
        negative.fat = -1.0;
        assert!(!negative.is_valid());

        let mut nan = sample_food();
        nan.calories = f64::NAN;
        assert!(!nan.is_valid());

        let no_slots = sample_food().with_meal_times([]);
        assert!(!no_slots.is_valid());
    }

    #[test]
    fn test_equality_case_insensitive() {
        let food1 = sample_food();
        let mut food2 = sample_food();
        food2.name = "OATMEAL".to_string();
        assert_eq!(food1, food2);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"name": "Egg", "calories": 78, "protein": 6.3, "fat": 5.3, "carbs": 0.6}"#;
        let food: FoodItem = serde_json::from_str(json).unwrap();
        assert_eq!(food.meal_times.len(), 4);
        assert!(food.tags.is_empty());
    }
}
