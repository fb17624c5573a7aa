//! Data models
//!
//! Rust structs representing catalog and user-state entities.

mod nutrition;
mod recipe;

pub use nutrition::{Nutrition, NUTRIENT_KEYS};
pub use recipe::{
    CookingStep, Difficulty, Ingredient, IngredientDraft, Recipe, RecipeDraft, StepDraft,
    ValidationError,
};
