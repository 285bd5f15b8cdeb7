use serde::Serialize;

use crate::models::food::FoodItem;
use crate::models::nutrient::{MealSlot, Nutrient};

/// Aggregate nutritional values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl NutrientTotals {
    pub fn of<'a>(items: impl IntoIterator<Item = &'a FoodItem>) -> Self {
        items.into_iter().fold(Self::default(), |acc, f| acc.add(f))
    }

    /// Totals with one more unit of `food`.
    pub fn add(&self, food: &FoodItem) -> Self {
        Self {
            calories: self.calories + food.calories,
            protein: self.protein + food.protein,
            fat: self.fat + food.fat,
            carbs: self.carbs + food.carbs,
        }
    }

    /// Totals with one unit of `food` taken back out.
    pub fn remove(&self, food: &FoodItem) -> Self {
        Self {
            calories: self.calories - food.calories,
            protein: self.protein - food.protein,
            fat: self.fat - food.fat,
            carbs: self.carbs - food.carbs,
        }
    }

    /// Element-wise sum.
    pub fn plus(&self, other: &NutrientTotals) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            fat: self.fat + other.fat,
            carbs: self.carbs + other.carbs,
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbs => self.carbs,
        }
    }
}

/// A daily meal plan: the foods chosen for each slot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MealPlan {
    pub breakfast: Vec<FoodItem>,
    pub lunch: Vec<FoodItem>,
    pub dinner: Vec<FoodItem>,
    pub snacks: Vec<FoodItem>,
}

impl MealPlan {
    pub fn slot(&self, slot: MealSlot) -> &[FoodItem] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snack => &self.snacks,
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<FoodItem> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snack => &mut self.snacks,
        }
    }

    /// All items in slot order.
    pub fn all_items(&self) -> impl Iterator<Item = &FoodItem> {
        MealSlot::ALL.into_iter().flat_map(move |s| self.slot(s).iter())
    }

    pub fn totals(&self) -> NutrientTotals {
        NutrientTotals::of(self.all_items())
    }

    pub fn len(&self) -> usize {
        MealSlot::ALL.iter().map(|&s| self.slot(s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
