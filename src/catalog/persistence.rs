use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{PlannerError, Result};
use crate::models::{FoodItem, MealSlot};

/// Columns every CSV catalog must have.
const REQUIRED_COLUMNS: [&str; 5] = ["name", "calories", "protein", "fat", "carbs"];

/// One CSV row. `meal_times` and `tags` are `|`-separated and optional.
#[derive(Debug, Deserialize)]
struct FoodRow {
    name: String,
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
    #[serde(default)]
    meal_times: Option<String>,
    #[serde(default)]
    tags: Option<String>,
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

impl FoodRow {
    fn into_food(self) -> Result<FoodItem> {
        let meal_times = split_list(self.meal_times.as_deref())
            .map(|part| part.parse::<MealSlot>())
            .collect::<Result<BTreeSet<MealSlot>>>()?;
        let tags: Vec<&str> = split_list(self.tags.as_deref()).collect();

        let mut food = FoodItem::new(self.name.trim(), self.calories, self.protein, self.fat, self.carbs)
            .with_tags(tags);
        if !meal_times.is_empty() {
            food.meal_times = meal_times;
        }

        if !food.is_valid() {
            return Err(PlannerError::InvalidInput(format!(
                "invalid nutritional values for '{}'",
                food.name
            )));
        }
        Ok(food)
    }
}

/// Load foods from a catalog file.
///
/// `.json` files hold an array of foods; anything else is read as CSV with a
/// header row. Rows that fail to parse or validate are skipped with a warning.
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<Vec<FoodItem>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let foods = if is_json {
        load_json(path)?
    } else {
        load_csv(path)?
    };

    info!("Loaded {} foods from {}", foods.len(), path.display());
    Ok(foods)
}

fn load_csv(path: &Path) -> Result<Vec<FoodItem>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(PlannerError::InvalidInput(format!(
                "{}: missing column '{}'",
                path.display(),
                column
            )));
        }
    }

    let mut foods = Vec::new();
    for (row_num, row) in reader.deserialize::<FoodRow>().enumerate() {
        match row.map_err(PlannerError::from).and_then(FoodRow::into_food) {
            Ok(food) => foods.push(food),
            Err(e) => warn!("Row {} skipped: {}", row_num + 1, e),
        }
    }

    Ok(foods)
}

fn load_json(path: &Path) -> Result<Vec<FoodItem>> {
    let content = fs::read_to_string(path)?;
    let foods: Vec<FoodItem> = serde_json::from_str(&content)?;

    Ok(foods
        .into_iter()
        .enumerate()
        .filter_map(|(i, food)| {
            if food.is_valid() {
                Some(food)
            } else {
                warn!("Entry {} skipped: invalid values for '{}'", i + 1, food.name);
                None
            }
        })
        .collect())
}

/// Save foods as a pretty-printed JSON array.
pub fn save_foods<P: AsRef<Path>>(path: P, foods: &[FoodItem]) -> Result<()> {
    let json = serde_json::to_string_pretty(foods)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = csv_file(
            "name,calories,protein,fat,carbs,meal_times,tags\n\
             Oatmeal,150,5,3,27,breakfast|snack,vegan|grain\n\
             Chicken Breast,165,31,3.6,0,lunch | dinner,meat\n\
             Apple,52,0.3,0.2,14,,\n",
        );

        let foods = load_foods(file.path()).unwrap();
        assert_eq!(foods.len(), 3);

        assert_eq!(foods[0].name, "Oatmeal");
        assert!(foods[0].suits(MealSlot::Breakfast));
        assert!(!foods[0].suits(MealSlot::Dinner));
        assert!(foods[0].has_tag("grain"));

        assert!(foods[1].suits(MealSlot::Dinner));
        assert!(foods[1].has_tag("meat"));

        assert_eq!(foods[2].meal_times.len(), 4);
        assert!(foods[2].tags.is_empty());
    }

    #[test]
    fn test_optional_columns_absent() {
        let file = csv_file("name,calories,protein,fat,carbs\nRice,130,2.7,0.3,28\n");
        let foods = load_foods(file.path()).unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].meal_times.len(), 4);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let file = csv_file(
            "name,calories,protein,fat,carbs,meal_times\n\
             Good,100,5,2,10,lunch\n\
             NotANumber,abc,5,2,10,lunch\n\
             Negative,100,-5,2,10,lunch\n\
             WrongSlot,100,5,2,10,brunch\n\
             AlsoGood,200,10,4,20,\n",
        );

        let foods = load_foods(file.path()).unwrap();
        let names: Vec<&str> = foods.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "AlsoGood"]);
    }

    #[test]
    fn test_missing_column() {
        let file = csv_file("name,calories,protein,fat\nRice,130,2.7,0.3\n");
        assert!(matches!(
            load_foods(file.path()),
            Err(PlannerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_foods("definitely_missing_catalog.csv");
        assert!(matches!(result, Err(PlannerError::Io(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let foods = vec![
            FoodItem::new("Egg", 78.0, 6.3, 5.3, 0.6)
                .with_meal_times([MealSlot::Breakfast])
                .with_tags(["vegetarian"]),
        ];

        let out_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        save_foods(out_file.path(), &foods).unwrap();

        let reloaded = load_foods(out_file.path()).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].name, "Egg");
        assert!(reloaded[0].suits(MealSlot::Breakfast));
        assert!(!reloaded[0].suits(MealSlot::Lunch));
        assert!(reloaded[0].has_tag("vegetarian"));
    }
}
