//! Recipe store
//!
//! The built-in catalog is loaded and validated once at startup. User
//! state (custom recipes and favorites) lives in a separate JSON file:
//! loaded on start, written back on every change.

mod filter;

pub use filter::RecipeFilter;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{Recipe, RecipeDraft, ValidationError};

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid recipe '{id}': {source}")]
    InvalidRecipe {
        id: String,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("recipe not found: {0}")]
    NotFound(String),

    #[error("recipe {0} is a built-in catalog entry and cannot be modified")]
    NotCustom(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted user state: everything not shipped in the catalog
#[derive(Debug, Default, Serialize, Deserialize)]
struct UserState {
    #[serde(default)]
    custom_recipes: Vec<Recipe>,
    #[serde(default)]
    favorites: Vec<String>,
}

#[derive(Debug)]
struct StoreState {
    catalog: Vec<Recipe>,
    custom: Vec<Recipe>,
    favorites: Vec<String>,
    next_custom_id: u64,
}

/// Shared recipe store handle
#[derive(Clone, Debug)]
pub struct RecipeStore {
    state: Arc<RwLock<StoreState>>,
    state_path: PathBuf,
    max_ingredients: usize,
    max_steps: usize,
}

impl RecipeStore {
    /// Load the catalog and user state described by the configuration
    pub fn open(config: &AppConfig) -> StoreResult<Self> {
        let catalog = load_catalog(&config.catalog_path)?;

        let user_state = if config.state_path.exists() {
            let text = fs::read_to_string(&config.state_path)?;
            serde_json::from_str::<UserState>(&text)?
        } else {
            UserState::default()
        };
        for recipe in &user_state.custom_recipes {
            recipe.validate().map_err(|source| StoreError::InvalidRecipe {
                id: recipe.id.clone(),
                source,
            })?;
        }

        let next_custom_id = catalog
            .iter()
            .chain(user_state.custom_recipes.iter())
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        tracing::info!(
            catalog = catalog.len(),
            custom = user_state.custom_recipes.len(),
            favorites = user_state.favorites.len(),
            "recipe store loaded"
        );

        Ok(Self {
            state: Arc::new(RwLock::new(StoreState {
                catalog,
                custom: user_state.custom_recipes,
                favorites: user_state.favorites,
                next_custom_id,
            })),
            state_path: config.state_path.clone(),
            max_ingredients: config.max_ingredients,
            max_steps: config.max_steps,
        })
    }

    /// All recipes, catalog first, then custom
    pub fn all(&self) -> Vec<Recipe> {
        let state = self.state.read().unwrap();
        state
            .catalog
            .iter()
            .chain(state.custom.iter())
            .cloned()
            .collect()
    }

    /// Look up a recipe by id
    pub fn get(&self, id: &str) -> Option<Recipe> {
        let state = self.state.read().unwrap();
        state
            .catalog
            .iter()
            .chain(state.custom.iter())
            .find(|r| r.id == id)
            .cloned()
    }

    /// Recipes matching the filter, in catalog order
    pub fn filtered(&self, filter: &RecipeFilter) -> Vec<Recipe> {
        let state = self.state.read().unwrap();
        state
            .catalog
            .iter()
            .chain(state.custom.iter())
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Distinct categories in use, sorted
    pub fn categories(&self) -> Vec<String> {
        let state = self.state.read().unwrap();
        let mut categories: Vec<String> = state
            .catalog
            .iter()
            .chain(state.custom.iter())
            .filter_map(|r| r.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Total number of recipes
    pub fn count(&self) -> usize {
        let state = self.state.read().unwrap();
        state.catalog.len() + state.custom.len()
    }

    /// Validate and persist a user-created recipe
    pub fn add_custom(&self, draft: RecipeDraft) -> StoreResult<Recipe> {
        draft.validate(self.max_ingredients, self.max_steps)?;

        let mut state = self.state.write().unwrap();
        let id = state.next_custom_id.to_string();
        state.next_custom_id += 1;
        let recipe = Recipe::from_draft(draft, id, now_timestamp());
        state.custom.push(recipe.clone());
        self.save_state(&state)?;

        tracing::info!(id = %recipe.id, name = %recipe.name, "custom recipe added");
        Ok(recipe)
    }

    /// Replace a user-created recipe's content
    pub fn update_custom(&self, id: &str, draft: RecipeDraft) -> StoreResult<Recipe> {
        draft.validate(self.max_ingredients, self.max_steps)?;

        let mut state = self.state.write().unwrap();
        if state.catalog.iter().any(|r| r.id == id) {
            return Err(StoreError::NotCustom(id.to_string()));
        }
        let position = state
            .custom
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let created_at = state.custom[position].created_at.clone();
        let mut recipe = Recipe::from_draft(draft, id.to_string(), now_timestamp());
        recipe.created_at = created_at;
        state.custom[position] = recipe.clone();
        self.save_state(&state)?;

        tracing::info!(id = %recipe.id, "custom recipe updated");
        Ok(recipe)
    }

    /// Delete a user-created recipe (and its favorite mark, if any)
    pub fn delete_custom(&self, id: &str) -> StoreResult<()> {
        let mut state = self.state.write().unwrap();
        if state.catalog.iter().any(|r| r.id == id) {
            return Err(StoreError::NotCustom(id.to_string()));
        }
        let position = state
            .custom
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        state.custom.remove(position);
        state.favorites.retain(|f| f != id);
        self.save_state(&state)?;

        tracing::info!(id, "custom recipe deleted");
        Ok(())
    }

    /// Flip a recipe's favorite mark; returns the new state
    pub fn toggle_favorite(&self, id: &str) -> StoreResult<bool> {
        let mut state = self.state.write().unwrap();
        let exists = state
            .catalog
            .iter()
            .chain(state.custom.iter())
            .any(|r| r.id == id);
        if !exists {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let is_favorite = if state.favorites.iter().any(|f| f == id) {
            state.favorites.retain(|f| f != id);
            false
        } else {
            state.favorites.push(id.to_string());
            true
        };
        self.save_state(&state)?;
        Ok(is_favorite)
    }

    /// Favorited recipes, in the order they were marked
    pub fn favorites(&self) -> Vec<Recipe> {
        let state = self.state.read().unwrap();
        state
            .favorites
            .iter()
            .filter_map(|id| {
                state
                    .catalog
                    .iter()
                    .chain(state.custom.iter())
                    .find(|r| &r.id == id)
                    .cloned()
            })
            .collect()
    }

    /// Whether a recipe is currently favorited
    pub fn is_favorite(&self, id: &str) -> bool {
        let state = self.state.read().unwrap();
        state.favorites.iter().any(|f| f == id)
    }

    /// Write the user state file (save-on-change boundary)
    fn save_state(&self, state: &StoreState) -> StoreResult<()> {
        if let Some(parent) = self.state_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let user_state = UserState {
            custom_recipes: state.custom.clone(),
            favorites: state.favorites.clone(),
        };
        let json = serde_json::to_string_pretty(&user_state)?;
        fs::write(&self.state_path, json)?;
        Ok(())
    }
}

/// Load and validate a recipe catalog file
pub fn load_catalog(path: &Path) -> StoreResult<Vec<Recipe>> {
    let text = fs::read_to_string(path)?;
    let catalog: Vec<Recipe> = serde_json::from_str(&text)?;
    for recipe in &catalog {
        recipe.validate().map_err(|source| StoreError::InvalidRecipe {
            id: recipe.id.clone(),
            source,
        })?;
    }
    Ok(catalog)
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IngredientDraft, StepDraft};

    fn catalog_json() -> &'static str {
        r#"[
          {
            "id": "1",
            "name": "Pancakes",
            "description": "Fluffy breakfast pancakes",
            "cook_time": 20,
            "prep_time": 10,
            "servings": 4,
            "difficulty": "easy",
            "category": "Breakfast",
            "ingredients": [
              { "id": "1-ing-1", "name": "Flour", "amount": "2", "unit": "cups" },
              { "id": "1-ing-2", "name": "Salt", "amount": "to taste", "unit": null }
            ],
            "steps": [
              { "id": "1-step-1", "step_number": 1, "description": "Mix the batter", "duration": 5, "temperature": null },
              { "id": "1-step-2", "step_number": 2, "description": "Fry until golden", "duration": 15, "temperature": "medium heat" }
            ],
            "nutrition": { "calories": 350, "protein": 9 },
            "tags": ["sweet"]
          }
        ]"#
    }

    fn test_config(name: &str) -> AppConfig {
        let dir = std::env::temp_dir()
            .join("chefmate-tests")
            .join(format!("{}-{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        let catalog_path = dir.join("catalog.json");
        fs::write(&catalog_path, catalog_json()).unwrap();
        AppConfig {
            catalog_path,
            state_path: dir.join("user_state.json"),
            default_servings: 4,
            max_ingredients: 50,
            max_steps: 50,
        }
    }

    fn draft(name: &str) -> RecipeDraft {
        RecipeDraft {
            name: name.to_string(),
            description: None,
            cook_time: 15,
            prep_time: None,
            servings: 2,
            difficulty: None,
            category: Some("Snack".to_string()),
            ingredients: vec![IngredientDraft {
                name: "Bread".to_string(),
                amount: "2".to_string(),
                unit: Some("slices".to_string()),
            }],
            steps: vec![StepDraft {
                description: "Toast it".to_string(),
                duration: Some(3),
                temperature: None,
            }],
            nutrition: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_open_loads_catalog() {
        let store = RecipeStore::open(&test_config("open")).unwrap();
        assert_eq!(store.count(), 1);
        let recipe = store.get("1").unwrap();
        assert_eq!(recipe.name, "Pancakes");
        assert!(!recipe.is_custom);
    }

    #[test]
    fn test_invalid_catalog_entry_is_fatal() {
        let config = test_config("invalid-catalog");
        fs::write(
            &config.catalog_path,
            catalog_json().replace("\"Pancakes\"", "\"   \""),
        )
        .unwrap();
        let err = RecipeStore::open(&config).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecipe { .. }));
    }

    #[test]
    fn test_add_custom_assigns_next_id_and_persists() {
        let config = test_config("add-custom");
        let store = RecipeStore::open(&config).unwrap();
        let recipe = store.add_custom(draft("Cheese Toast")).unwrap();
        assert_eq!(recipe.id, "2");
        assert!(recipe.is_custom);

        // State file round-trip: a fresh store sees the custom recipe
        let reloaded = RecipeStore::open(&config).unwrap();
        assert_eq!(reloaded.get("2").unwrap().name, "Cheese Toast");
    }

    #[test]
    fn test_update_keeps_created_at_and_rejects_catalog_entries() {
        let config = test_config("update-custom");
        let store = RecipeStore::open(&config).unwrap();
        let created = store.add_custom(draft("Cheese Toast")).unwrap();

        let updated = store.update_custom(&created.id, draft("Ham Toast")).unwrap();
        assert_eq!(updated.name, "Ham Toast");
        assert_eq!(updated.created_at, created.created_at);

        let err = store.update_custom("1", draft("Nope")).unwrap_err();
        assert!(matches!(err, StoreError::NotCustom(_)));
    }

    #[test]
    fn test_delete_custom_clears_favorite() {
        let config = test_config("delete-custom");
        let store = RecipeStore::open(&config).unwrap();
        let recipe = store.add_custom(draft("Cheese Toast")).unwrap();
        assert!(store.toggle_favorite(&recipe.id).unwrap());

        store.delete_custom(&recipe.id).unwrap();
        assert!(store.get(&recipe.id).is_none());
        assert!(!store.is_favorite(&recipe.id));

        let err = store.delete_custom("1").unwrap_err();
        assert!(matches!(err, StoreError::NotCustom(_)));
    }

    #[test]
    fn test_toggle_favorite_round_trip() {
        let config = test_config("favorites");
        let store = RecipeStore::open(&config).unwrap();
        assert!(store.toggle_favorite("1").unwrap());
        assert_eq!(store.favorites()[0].id, "1");

        // Favorites survive a reload
        let reloaded = RecipeStore::open(&config).unwrap();
        assert!(reloaded.is_favorite("1"));
        assert!(!reloaded.toggle_favorite("1").unwrap());
        assert!(reloaded.favorites().is_empty());

        let err = store.toggle_favorite("missing").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_filtered_uses_filter() {
        let store = RecipeStore::open(&test_config("filtered")).unwrap();
        store.add_custom(draft("Cheese Toast")).unwrap();

        let by_search = store.filtered(&RecipeFilter {
            search: Some("pancake".to_string()),
            ..Default::default()
        });
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].id, "1");

        let by_category = store.filtered(&RecipeFilter {
            category: Some("Snack".to_string()),
            ..Default::default()
        });
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].name, "Cheese Toast");

        assert_eq!(store.categories(), vec!["Breakfast", "Snack"]);
    }
}
