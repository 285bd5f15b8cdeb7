use std::collections::HashSet;

use crate::models::{FoodItem, MealSlot, Nutrient};

/// A boxed test over a food.
pub type Predicate = Box<dyn Fn(&FoodItem) -> bool>;

/// Keep the items that satisfy every predicate.
pub fn filter_items<'a, I>(items: I, predicates: &[Predicate]) -> Vec<&'a FoodItem>
where
    I: IntoIterator<Item = &'a FoodItem>,
{
    items
        .into_iter()
        .filter(|item| predicates.iter().all(|p| p(*item)))
        .collect()
}

/// Combine predicates into one that requires all of them.
pub fn compose(predicates: Vec<Predicate>) -> Predicate {
    Box::new(move |item: &FoodItem| predicates.iter().all(|p| p(item)))
}

pub fn by_meal_time(slot: MealSlot) -> Predicate {
    Box::new(move |item: &FoodItem| item.suits(slot))
}

pub fn by_tag(tag: &str) -> Predicate {
    let tag = tag.to_lowercase();
    Box::new(move |item: &FoodItem| item.tags.contains(&tag))
}

pub fn not_tag(tag: &str) -> Predicate {
    let tag = tag.to_lowercase();
    Box::new(move |item: &FoodItem| !item.tags.contains(&tag))
}

pub fn max_nutrient(nutrient: Nutrient, value: f64) -> Predicate {
    Box::new(move |item: &FoodItem| item.nutrient_value(nutrient) <= value)
}

pub fn min_nutrient(nutrient: Nutrient, value: f64) -> Predicate {
    Box::new(move |item: &FoodItem| item.nutrient_value(nutrient) >= value)
}

/// Exclude foods by name (case-insensitive).
pub fn by_name_not_in<S: AsRef<str>>(names: &[S]) -> Predicate {
    let names: HashSet<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();
    Box::new(move |item: &FoodItem| !names.contains(&item.key()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_foods() -> Vec<FoodItem> {
        vec![
            FoodItem::new("Yogurt", 120.0, 10.0, 4.0, 12.0)
                .with_meal_times([MealSlot::Breakfast, MealSlot::Snack])
                .with_tags(["vegetarian"]),
            FoodItem::new("Chicken Breast", 165.0, 31.0, 3.6, 0.0)
                .with_meal_times([MealSlot::Lunch, MealSlot::Dinner])
                .with_tags(["meat"]),
            FoodItem::new("Lentil Soup", 230.0, 18.0, 1.0, 40.0)
                .with_meal_times([MealSlot::Lunch, MealSlot::Dinner])
                .with_tags(["vegan"]),
        ]
    }

    fn names(items: &[&FoodItem]) -> Vec<String> {
        items.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_filter_by_meal_time() {
        let foods = sample_foods();
        let breakfast = filter_items(&foods, &[by_meal_time(MealSlot::Breakfast)]);
        assert_eq!(names(&breakfast), vec!["Yogurt"]);
        assert!(breakfast.iter().all(|f| f.suits(MealSlot::Breakfast)));
    }

    #[test]
    fn test_filter_by_tags() {
        let foods = sample_foods();
        let vegan = filter_items(&foods, &[by_tag("VEGAN")]);
        assert_eq!(names(&vegan), vec!["Lentil Soup"]);

        let meatless = filter_items(&foods, &[not_tag("meat")]);
        assert_eq!(meatless.len(), 2);
    }

    #[test]
    fn test_filter_multiple_predicates() {
        let foods = sample_foods();
        let lean_dinner = filter_items(
            &foods,
            &[
                by_meal_time(MealSlot::Dinner),
                min_nutrient(Nutrient::Protein, 20.0),
                max_nutrient(Nutrient::Fat, 5.0),
            ],
        );
        assert_eq!(names(&lean_dinner), vec!["Chicken Breast"]);
    }

    #[test]
    fn test_empty_predicates_keep_all() {
        let foods = sample_foods();
        assert_eq!(filter_items(&foods, &[]).len(), 3);
    }

    #[test]
    fn test_compose() {
        let foods = sample_foods();
        let combined = compose(vec![by_meal_time(MealSlot::Lunch), not_tag("meat")]);
        let matched: Vec<&FoodItem> = foods.iter().filter(|f| combined(*f)).collect();
        assert_eq!(names(&matched), vec!["Lentil Soup"]);
    }

    #[test]
    fn test_by_name_not_in() {
        let foods = sample_foods();
        let kept = filter_items(&foods, &[by_name_not_in(&["yogurt"])]);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|f| f.name != "Yogurt"));
    }
}
