//! Recipe browsing tools
//!
//! Searching the catalog, scaled recipe detail, custom recipe management,
//! and favorites.

use serde::Serialize;

use crate::config::RECIPE_CATEGORIES;
use crate::models::{Difficulty, Recipe, RecipeDraft};
use crate::scaling::{format_nutrition_value, scale_amount};
use crate::store::{RecipeFilter, RecipeStore};

/// Recipe summary for listings
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub cook_time: u32,
    pub prep_time: Option<u32>,
    pub servings: u32,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub is_custom: bool,
}

/// Response for search_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub total: usize,
}

/// One ingredient line, scaled for the requested serving count
#[derive(Debug, Serialize)]
pub struct IngredientView {
    pub name: String,
    pub amount: String,
    pub unit: Option<String>,
    /// Ready-to-render line, e.g. "4 cups Flour"
    pub display: String,
}

/// One instruction step
#[derive(Debug, Serialize)]
pub struct StepView {
    pub step_number: u32,
    pub description: String,
    pub duration_minutes: Option<u32>,
    pub temperature: Option<String>,
}

/// One nutrition row, scaled and formatted for display
#[derive(Debug, Serialize)]
pub struct NutrientView {
    pub key: String,
    /// e.g. "400cal", "12g", "200mg"
    pub display: String,
}

/// Full recipe detail with amounts scaled to target_servings
#[derive(Debug, Serialize)]
pub struct RecipeDetailResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub cook_time: u32,
    pub prep_time: Option<u32>,
    pub base_servings: u32,
    pub target_servings: u32,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub ingredients: Vec<IngredientView>,
    pub steps: Vec<StepView>,
    pub nutrition: Vec<NutrientView>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub is_custom: bool,
}

/// Response for list_categories
#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    /// Categories recipes can be filed under
    pub available: Vec<String>,
    /// Categories currently used by catalog or custom recipes
    pub in_use: Vec<String>,
}

/// Response for add_recipe
#[derive(Debug, Serialize)]
pub struct AddRecipeResponse {
    pub id: String,
    pub name: String,
    pub created_at: Option<String>,
}

/// Response for update_recipe
#[derive(Debug, Serialize)]
pub struct UpdateRecipeResponse {
    pub success: bool,
    pub id: String,
    pub updated_at: Option<String>,
}

/// Response for delete_recipe
#[derive(Debug, Serialize)]
pub struct DeleteRecipeResponse {
    pub success: bool,
    pub deleted_id: String,
}

/// Response for toggle_favorite
#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub id: String,
    pub is_favorite: bool,
}

/// Response for list_favorites
#[derive(Debug, Serialize)]
pub struct ListFavoritesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub count: usize,
}

fn summarize(store: &RecipeStore, recipe: &Recipe) -> RecipeSummary {
    RecipeSummary {
        id: recipe.id.clone(),
        name: recipe.name.clone(),
        description: recipe.description.clone(),
        cook_time: recipe.cook_time,
        prep_time: recipe.prep_time,
        servings: recipe.servings,
        difficulty: recipe.difficulty.map(|d| d.as_str().to_string()),
        category: recipe.category.clone(),
        tags: recipe.tags.clone(),
        is_favorite: store.is_favorite(&recipe.id),
        is_custom: recipe.is_custom,
    }
}

/// Search the catalog with optional filters
pub fn search_recipes(
    store: &RecipeStore,
    query: Option<&str>,
    category: Option<&str>,
    difficulty: Option<&str>,
    max_cook_time: Option<u32>,
    tags: Vec<String>,
) -> Result<ListRecipesResponse, String> {
    let difficulty = match difficulty {
        Some(text) => Some(
            Difficulty::from_str(text)
                .ok_or_else(|| format!("Unknown difficulty: {} (easy, medium, hard)", text))?,
        ),
        None => None,
    };

    let filter = RecipeFilter {
        search: query.map(|q| q.to_string()),
        category: category.map(|c| c.to_string()),
        difficulty,
        max_cook_time,
        tags,
    };

    let recipes: Vec<RecipeSummary> = store
        .filtered(&filter)
        .iter()
        .map(|r| summarize(store, r))
        .collect();
    let total = recipes.len();

    Ok(ListRecipesResponse { recipes, total })
}

/// Get full recipe detail, scaled to an optional target serving count
pub fn get_recipe(
    store: &RecipeStore,
    id: &str,
    servings: Option<u32>,
) -> Result<Option<RecipeDetailResponse>, String> {
    let recipe = match store.get(id) {
        Some(recipe) => recipe,
        None => return Ok(None),
    };

    let target_servings = servings.unwrap_or(recipe.servings).max(1);
    let base = recipe.servings as f64;
    let target = target_servings as f64;

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|ing| {
            let amount = scale_amount(&ing.amount, base, target);
            let display = match &ing.unit {
                Some(unit) => format!("{} {} {}", amount, unit, ing.name),
                None => format!("{} {}", amount, ing.name),
            };
            IngredientView {
                name: ing.name.clone(),
                amount,
                unit: ing.unit.clone(),
                display,
            }
        })
        .collect();

    let steps = recipe
        .sorted_steps()
        .into_iter()
        .map(|step| StepView {
            step_number: step.step_number,
            description: step.description.clone(),
            duration_minutes: step.duration,
            temperature: step.temperature.clone(),
        })
        .collect();

    let nutrition = recipe
        .nutrition
        .as_ref()
        .map(|n| {
            n.entries()
                .into_iter()
                .map(|(key, value)| NutrientView {
                    key: key.to_string(),
                    display: format_nutrition_value(key, value, base, target),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Some(RecipeDetailResponse {
        id: recipe.id.clone(),
        name: recipe.name.clone(),
        description: recipe.description.clone(),
        cook_time: recipe.cook_time,
        prep_time: recipe.prep_time,
        base_servings: recipe.servings,
        target_servings,
        difficulty: recipe.difficulty.map(|d| d.as_str().to_string()),
        category: recipe.category.clone(),
        ingredients,
        steps,
        nutrition,
        tags: recipe.tags.clone(),
        is_favorite: store.is_favorite(&recipe.id),
        is_custom: recipe.is_custom,
    }))
}

/// List recipe categories
pub fn list_categories(store: &RecipeStore) -> ListCategoriesResponse {
    ListCategoriesResponse {
        available: RECIPE_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        in_use: store.categories(),
    }
}

/// Add a user-created recipe
pub fn add_recipe(store: &RecipeStore, draft: RecipeDraft) -> Result<AddRecipeResponse, String> {
    let recipe = store
        .add_custom(draft)
        .map_err(|e| format!("Failed to add recipe: {}", e))?;
    Ok(AddRecipeResponse {
        id: recipe.id,
        name: recipe.name,
        created_at: recipe.created_at,
    })
}

/// Update a user-created recipe
pub fn update_recipe(
    store: &RecipeStore,
    id: &str,
    draft: RecipeDraft,
) -> Result<UpdateRecipeResponse, String> {
    let recipe = store
        .update_custom(id, draft)
        .map_err(|e| format!("Failed to update recipe: {}", e))?;
    Ok(UpdateRecipeResponse {
        success: true,
        id: recipe.id,
        updated_at: recipe.updated_at,
    })
}

/// Delete a user-created recipe
pub fn delete_recipe(store: &RecipeStore, id: &str) -> Result<DeleteRecipeResponse, String> {
    store
        .delete_custom(id)
        .map_err(|e| format!("Failed to delete recipe: {}", e))?;
    Ok(DeleteRecipeResponse {
        success: true,
        deleted_id: id.to_string(),
    })
}

/// Flip a recipe's favorite mark
pub fn toggle_favorite(store: &RecipeStore, id: &str) -> Result<ToggleFavoriteResponse, String> {
    let is_favorite = store
        .toggle_favorite(id)
        .map_err(|e| format!("Failed to toggle favorite: {}", e))?;
    Ok(ToggleFavoriteResponse {
        id: id.to_string(),
        is_favorite,
    })
}

/// List favorited recipes
pub fn list_favorites(store: &RecipeStore) -> ListFavoritesResponse {
    let recipes: Vec<RecipeSummary> = store
        .favorites()
        .iter()
        .map(|r| summarize(store, r))
        .collect();
    let count = recipes.len();
    ListFavoritesResponse { recipes, count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{IngredientDraft, StepDraft};
    use std::fs;

    fn store(name: &str) -> RecipeStore {
        let dir = std::env::temp_dir()
            .join("chefmate-tool-tests")
            .join(format!("{}-{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        let catalog_path = dir.join("catalog.json");
        fs::write(
            &catalog_path,
            r#"[{
                "id": "1",
                "name": "Lemon Pasta",
                "description": "Bright weeknight pasta",
                "cook_time": 25,
                "prep_time": 5,
                "servings": 4,
                "difficulty": "easy",
                "category": "Pasta",
                "ingredients": [
                    { "id": "1-ing-1", "name": "Spaghetti", "amount": "1/2", "unit": "lb" },
                    { "id": "1-ing-2", "name": "Lemons", "amount": "10-12", "unit": null },
                    { "id": "1-ing-3", "name": "Salt", "amount": "to taste", "unit": null }
                ],
                "steps": [
                    { "id": "1-step-1", "step_number": 1, "description": "Boil the pasta", "duration": 10, "temperature": null },
                    { "id": "1-step-2", "step_number": 2, "description": "Toss with lemon", "duration": null, "temperature": null }
                ],
                "nutrition": { "calories": 200, "protein": 10, "sodium": 100 },
                "tags": ["weeknight"]
            }]"#,
        )
        .unwrap();
        let config = AppConfig {
            catalog_path,
            state_path: dir.join("user_state.json"),
            default_servings: 4,
            max_ingredients: 50,
            max_steps: 50,
        };
        RecipeStore::open(&config).unwrap()
    }

    #[test]
    fn test_search_rejects_unknown_difficulty() {
        let store = store("difficulty");
        let err = search_recipes(&store, None, None, Some("impossible"), None, vec![]).unwrap_err();
        assert!(err.contains("Unknown difficulty"));
    }

    #[test]
    fn test_search_by_query() {
        let store = store("query");
        let result = search_recipes(&store, Some("lemon"), None, None, None, vec![]).unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.recipes[0].name, "Lemon Pasta");
    }

    #[test]
    fn test_get_recipe_scales_for_double_servings() {
        let store = store("detail");
        let detail = get_recipe(&store, "1", Some(8)).unwrap().unwrap();
        assert_eq!(detail.base_servings, 4);
        assert_eq!(detail.target_servings, 8);

        assert_eq!(detail.ingredients[0].amount, "1");
        assert_eq!(detail.ingredients[0].display, "1 lb Spaghetti");
        assert_eq!(detail.ingredients[1].amount, "20-24");
        // Free-text amounts pass through untouched
        assert_eq!(detail.ingredients[2].amount, "to taste");

        let nutrition: Vec<(&str, &str)> = detail
            .nutrition
            .iter()
            .map(|n| (n.key.as_str(), n.display.as_str()))
            .collect();
        assert_eq!(
            nutrition,
            vec![("calories", "400cal"), ("protein", "20g"), ("sodium", "200mg")]
        );
    }

    #[test]
    fn test_get_recipe_defaults_to_base_servings() {
        let store = store("detail-default");
        let detail = get_recipe(&store, "1", None).unwrap().unwrap();
        assert_eq!(detail.target_servings, 4);
        // Ratio 1 reformats the parsed value
        assert_eq!(detail.ingredients[0].amount, "0.5");
        assert!(get_recipe(&store, "missing", None).unwrap().is_none());
    }

    #[test]
    fn test_custom_recipe_lifecycle() {
        let store = store("lifecycle");
        let draft = RecipeDraft {
            name: "Garlic Bread".to_string(),
            description: None,
            cook_time: 12,
            prep_time: None,
            servings: 2,
            difficulty: None,
            category: Some("Appetizer".to_string()),
            ingredients: vec![IngredientDraft {
                name: "Baguette".to_string(),
                amount: "1".to_string(),
                unit: None,
            }],
            steps: vec![StepDraft {
                description: "Bake until crisp".to_string(),
                duration: Some(12),
                temperature: Some("200C".to_string()),
            }],
            nutrition: None,
            tags: vec![],
        };

        let added = add_recipe(&store, draft.clone()).unwrap();
        assert_eq!(added.name, "Garlic Bread");

        let favorite = toggle_favorite(&store, &added.id).unwrap();
        assert!(favorite.is_favorite);
        assert_eq!(list_favorites(&store).count, 1);

        let mut renamed = draft;
        renamed.name = "Cheesy Garlic Bread".to_string();
        let updated = update_recipe(&store, &added.id, renamed).unwrap();
        assert!(updated.success);

        let deleted = delete_recipe(&store, &added.id).unwrap();
        assert!(deleted.success);
        assert_eq!(list_favorites(&store).count, 0);

        // Built-in catalog entries stay read-only
        let err = delete_recipe(&store, "1").unwrap_err();
        assert!(err.contains("built-in"));
    }

    #[test]
    fn test_list_categories() {
        let store = store("categories");
        let result = list_categories(&store);
        assert!(result.available.contains(&"Pasta".to_string()));
        assert_eq!(result.in_use, vec!["Pasta"]);
    }
}
