//! Recipe model
//!
//! Strongly-typed recipe schema. Catalog and user-submitted data are
//! validated here, at the data-access boundary, so everything downstream
//! (scaling, cooking sessions) can assume well-formed input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Nutrition;

/// Validation failures for catalog entries and user-submitted recipes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("recipe name cannot be empty")]
    EmptyName,

    #[error("servings must be at least 1")]
    ZeroServings,

    #[error("recipe needs at least one ingredient")]
    NoIngredients,

    #[error("recipe needs at least one step")]
    NoSteps,

    #[error("too many ingredients: {count} (limit {limit})")]
    TooManyIngredients { count: usize, limit: usize },

    #[error("too many steps: {count} (limit {limit})")]
    TooManySteps { count: usize, limit: usize },

    #[error("ingredient {position}: name cannot be empty")]
    EmptyIngredientName { position: usize },

    #[error("ingredient {position}: amount cannot be empty")]
    EmptyIngredientAmount { position: usize },

    #[error("step {position}: description cannot be empty")]
    EmptyStepDescription { position: usize },

    #[error("step {position}: step number must be at least 1")]
    ZeroStepNumber { position: usize },

    #[error("nutrition values cannot be negative")]
    NegativeNutrition,
}

/// Recipe difficulty rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// An ingredient line: a free-form amount string plus an optional unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub unit: Option<String>,
}

/// One ordered instruction in a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingStep {
    pub id: String,
    pub step_number: u32,
    pub description: String,
    /// Minutes, when the step has a timed component
    pub duration: Option<u32>,
    pub temperature: Option<String>,
}

/// A recipe as stored in the catalog or user state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Minutes
    pub cook_time: u32,
    /// Minutes
    pub prep_time: Option<u32>,
    /// Serving count the ingredient amounts are authored for
    pub servings: u32,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<CookingStep>,
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_custom: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// User-submitted recipe data, before an id and timestamps are assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub description: Option<String>,
    pub cook_time: u32,
    pub prep_time: Option<u32>,
    #[serde(default = "default_servings")]
    pub servings: u32,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub ingredients: Vec<IngredientDraft>,
    pub steps: Vec<StepDraft>,
    pub nutrition: Option<Nutrition>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_servings() -> u32 {
    4
}

/// Ingredient line of a draft (ids are assigned on save)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDraft {
    pub name: String,
    pub amount: String,
    pub unit: Option<String>,
}

/// Step of a draft; step numbers are assigned from list order on save
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDraft {
    pub description: String,
    pub duration: Option<u32>,
    pub temperature: Option<String>,
}

impl RecipeDraft {
    /// Validate user input against the catalog limits
    pub fn validate(&self, max_ingredients: usize, max_steps: usize) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.servings < 1 {
            return Err(ValidationError::ZeroServings);
        }
        if self.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        if self.ingredients.len() > max_ingredients {
            return Err(ValidationError::TooManyIngredients {
                count: self.ingredients.len(),
                limit: max_ingredients,
            });
        }
        if self.steps.is_empty() {
            return Err(ValidationError::NoSteps);
        }
        if self.steps.len() > max_steps {
            return Err(ValidationError::TooManySteps {
                count: self.steps.len(),
                limit: max_steps,
            });
        }
        for (i, ingredient) in self.ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                return Err(ValidationError::EmptyIngredientName { position: i + 1 });
            }
            if ingredient.amount.trim().is_empty() {
                return Err(ValidationError::EmptyIngredientAmount { position: i + 1 });
            }
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.description.trim().is_empty() {
                return Err(ValidationError::EmptyStepDescription { position: i + 1 });
            }
        }
        if let Some(nutrition) = &self.nutrition {
            if !nutrition.is_valid() {
                return Err(ValidationError::NegativeNutrition);
            }
        }
        Ok(())
    }
}

impl Recipe {
    /// Build a stored recipe from a validated draft
    pub fn from_draft(draft: RecipeDraft, id: String, timestamp: String) -> Self {
        let ingredients = draft
            .ingredients
            .into_iter()
            .enumerate()
            .map(|(i, ing)| Ingredient {
                id: format!("{}-ing-{}", id, i + 1),
                name: ing.name,
                amount: ing.amount,
                unit: ing.unit,
            })
            .collect();
        let steps = draft
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| CookingStep {
                id: format!("{}-step-{}", id, i + 1),
                step_number: (i + 1) as u32,
                description: step.description,
                duration: step.duration,
                temperature: step.temperature,
            })
            .collect();

        Self {
            id,
            name: draft.name,
            description: draft.description,
            cook_time: draft.cook_time,
            prep_time: draft.prep_time,
            servings: draft.servings,
            difficulty: draft.difficulty,
            category: draft.category,
            ingredients,
            steps,
            nutrition: draft.nutrition,
            tags: draft.tags,
            is_custom: true,
            created_at: Some(timestamp.clone()),
            updated_at: Some(timestamp),
        }
    }

    /// Validate a stored recipe (applied to every catalog entry on load)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.servings < 1 {
            return Err(ValidationError::ZeroServings);
        }
        if self.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        if self.steps.is_empty() {
            return Err(ValidationError::NoSteps);
        }
        for (i, ingredient) in self.ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                return Err(ValidationError::EmptyIngredientName { position: i + 1 });
            }
            if ingredient.amount.trim().is_empty() {
                return Err(ValidationError::EmptyIngredientAmount { position: i + 1 });
            }
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.description.trim().is_empty() {
                return Err(ValidationError::EmptyStepDescription { position: i + 1 });
            }
            if step.step_number < 1 {
                return Err(ValidationError::ZeroStepNumber { position: i + 1 });
            }
        }
        if let Some(nutrition) = &self.nutrition {
            if !nutrition.is_valid() {
                return Err(ValidationError::NegativeNutrition);
            }
        }
        Ok(())
    }

    /// Steps ordered by step number
    pub fn sorted_steps(&self) -> Vec<&CookingStep> {
        let mut steps: Vec<&CookingStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.step_number);
        steps
    }
}
