mod manager;
mod persistence;

pub use manager::FoodCatalog;
pub use persistence::{load_foods, save_foods};
