use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{PlannerError, Result};
use crate::models::FoodItem;
use crate::planner::filters::{by_name_not_in, filter_items, Predicate};

/// Minimum Jaro-Winkler similarity for a name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// The foods available for planning, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Vec<FoodItem>,
    /// Lowercase name to position in `foods`.
    index: HashMap<String, usize>,
}

impl FoodCatalog {
    /// Create a catalog; a repeated name replaces the earlier entry in place.
    pub fn new(foods: Vec<FoodItem>) -> Self {
        let mut catalog = Self::default();
        for food in foods {
            catalog.insert(food);
        }
        catalog
    }

    /// Insert or replace a food (case-insensitive name match).
    pub fn insert(&mut self, food: FoodItem) {
        match self.index.get(&food.key()) {
            Some(&pos) => self.foods[pos] = food,
            None => {
                self.index.insert(food.key(), self.foods.len());
                self.foods.push(food);
            }
        }
    }

    /// Get a food by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&FoodItem> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&pos| &self.foods[pos])
    }

    /// Up to `limit` foods whose names resemble `name`, most similar first.
    pub fn suggestions(&self, name: &str, limit: usize) -> Vec<&FoodItem> {
        let needle = name.trim().to_lowercase();
        let mut scored: Vec<(&FoodItem, f64)> = self
            .foods
            .iter()
            .map(|f| (f, jaro_winkler(&f.key(), &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(limit).map(|(f, _)| f).collect()
    }

    /// Closest food name by Jaro-Winkler similarity.
    pub fn suggest(&self, name: &str) -> Option<&FoodItem> {
        self.suggestions(name, 1).into_iter().next()
    }

    /// Get a food by name, or fail with the closest suggestion.
    pub fn find(&self, name: &str) -> Result<&FoodItem> {
        self.get(name).ok_or_else(|| PlannerError::FoodNotFound {
            name: name.to_string(),
            hint: self
                .suggest(name)
                .map(|f| format!(" (did you mean '{}'?)", f.name))
                .unwrap_or_default(),
        })
    }

    /// A copy of the catalog without the named foods; every name must exist.
    pub fn without<S: AsRef<str>>(&self, names: &[S]) -> Result<FoodCatalog> {
        for name in names {
            self.find(name.as_ref())?;
        }
        let kept = filter_items(&self.foods, &[by_name_not_in(names)]);
        Ok(FoodCatalog::new(kept.into_iter().cloned().collect()))
    }

    /// Foods matching every predicate.
    pub fn filtered(&self, predicates: &[Predicate]) -> Vec<&FoodItem> {
        filter_items(&self.foods, predicates)
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    /// Count of foods in the catalog.
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    /// Check if the catalog has no foods.
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}
