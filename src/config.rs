//! Planner configuration loaded from `meal_planner.toml`.
//!
//! Every key is optional. Command-line flags override whatever the file sets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{Limit, MealSlot, Nutrient, NutrientMap, NutritionTarget, SlotCap, SlotCaps};
use crate::planner::Strategy;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "meal_planner.toml";

/// Catalog used when neither the command line nor the config names one.
pub const DEFAULT_CATALOG: &str = "data/foods.csv";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    pub catalog: Option<PathBuf>,
    pub strategy: Strategy,
    pub log_level: Option<String>,
    pub targets: NutrientMap<f64>,
    pub weights: NutrientMap<f64>,
    pub limits: NutrientMap<Limit>,
    pub slots: SlotCaps,
}

impl PlannerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load `explicit` if given (it must exist), else `meal_planner.toml` in
    /// the working directory if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// The catalog path, with `cli` taking precedence over the file.
    pub fn catalog_path(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.catalog.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
    }

    pub fn nutrition_target(&self) -> NutritionTarget {
        debug!("Config targets: {:?}", self.targets);
        NutritionTarget {
            targets: self.targets.clone(),
            weights: self.weights.clone(),
            limits: self.limits.clone(),
        }
    }
}

/// Built-in high-protein day: 2500 kcal with protein weighted up, one or two snacks.
pub fn high_protein_preset() -> (NutritionTarget, SlotCaps) {
    let target = NutritionTarget::new()
        .target(Nutrient::Calories, 2500.0)
        .target(Nutrient::Protein, 150.0)
        .target(Nutrient::Fat, 80.0)
        .target(Nutrient::Carbs, 200.0)
        .weighted(Nutrient::Protein, 2.5)
        .limit(Nutrient::Calories, Limit::between(2300.0, 2700.0))
        .limit(Nutrient::Fat, Limit::at_most(90.0))
        .limit(Nutrient::Carbs, Limit::between(180.0, 220.0));

    let mut caps = SlotCaps::default();
    caps.set(MealSlot::Snack, SlotCap::new(1, 2));
    (target, caps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let config = PlannerConfig::from_toml_str(
            r#"
            catalog = "foods.json"
            strategy = "greedy"
            log_level = "debug"

            [targets]
            calories = 2200
            protein = 140.5

            [weights]
            protein = 2.0

            [limits.fat]
            max = 80

            [limits.calories]
            min = 2000
            max = 2400

            [slots.snack]
            min = 0
            max = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog, Some(PathBuf::from("foods.json")));
        assert_eq!(config.strategy, Strategy::Greedy);
        assert_eq!(config.log_level.as_deref(), Some("debug"));

        let target = config.nutrition_target();
        assert_eq!(target.targets.get(Nutrient::Calories), Some(&2200.0));
        assert_eq!(target.targets.get(Nutrient::Protein), Some(&140.5));
        assert_eq!(target.weight(Nutrient::Protein), 2.0);
        assert_eq!(target.limits.get(Nutrient::Fat), Some(&Limit::at_most(80.0)));
        assert_eq!(
            target.limits.get(Nutrient::Calories),
            Some(&Limit::between(2000.0, 2400.0))
        );

        assert_eq!(config.slots.get(MealSlot::Snack), SlotCap::new(0, 1));
        assert_eq!(config.slots.get(MealSlot::Lunch), SlotCaps::default().lunch);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.strategy, Strategy::Knapsack);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        assert!(PlannerConfig::from_toml_str("colour = \"blue\"").is_err());
        assert!(PlannerConfig::from_toml_str("[targets]\nfiber = 30").is_err());
    }

    #[test]
    fn test_catalog_path_precedence() {
        let config = PlannerConfig {
            catalog: Some(PathBuf::from("from_config.csv")),
            ..Default::default()
        };
        assert_eq!(
            config.catalog_path(Some(Path::new("cli.csv"))),
            PathBuf::from("cli.csv")
        );
        assert_eq!(config.catalog_path(None), PathBuf::from("from_config.csv"));
        assert_eq!(
            PlannerConfig::default().catalog_path(None),
            PathBuf::from(DEFAULT_CATALOG)
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[targets]\ncalories = 1800\n").unwrap();

        let config = PlannerConfig::discover(Some(file.path())).unwrap();
        assert_eq!(config.targets.get(Nutrient::Calories), Some(&1800.0));

        assert!(PlannerConfig::discover(Some(Path::new("no_such_config.toml"))).is_err());
    }
}
