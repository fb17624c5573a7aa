//! Application configuration
//!
//! Explicit configuration built once at startup and passed into the
//! service; nothing here is process-global or mutable.

use std::path::PathBuf;

/// Categories offered when filing or filtering recipes
pub const RECIPE_CATEGORIES: &[&str] = &[
    "Breakfast",
    "Lunch",
    "Dinner",
    "Dessert",
    "Snack",
    "Appetizer",
    "Soup",
    "Salad",
    "Pasta",
    "Pizza",
    "Grilled",
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Low-Carb",
    "Keto",
];

/// Runtime configuration for the ChefMate service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the built-in recipe catalog (JSON, read-only)
    pub catalog_path: PathBuf,
    /// Path to the user state file (custom recipes + favorites, read/write)
    pub state_path: PathBuf,
    /// Serving count a recipe detail opens at when the recipe has none
    pub default_servings: u32,
    /// Maximum ingredients accepted per custom recipe
    pub max_ingredients: usize,
    /// Maximum steps accepted per custom recipe
    pub max_steps: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data = data_dir();
        Self {
            catalog_path: data.join("catalog.json"),
            state_path: data.join("user_state.json"),
            default_servings: 4,
            max_ingredients: 50,
            max_steps: 50,
        }
    }
}

impl AppConfig {
    /// Build the configuration, honoring environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("CHEFMATE_CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("CHEFMATE_STATE_PATH") {
            config.state_path = PathBuf::from(path);
        }
        config
    }
}

/// Get the data directory next to the executable (or the project root when
/// running from target/debug or target/release)
fn data_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path
}
