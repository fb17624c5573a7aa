//! Catalog filtering
//!
//! Mirrors the browse screen's combined search + filter behavior: free-text
//! search over name/description/tags, plus exact category and difficulty,
//! a cook-time ceiling, and any-of tag matching.

use crate::models::{Difficulty, Recipe};

/// Search and filter criteria for browsing the catalog
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Case-insensitive substring over name, description, and tags
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Keep recipes with cook_time at or under this many minutes
    pub max_cook_time: Option<u32>,
    /// Keep recipes carrying any of these tags
    pub tags: Vec<String>,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(query) = &self.search {
            let query = query.trim().to_lowercase();
            if !query.is_empty() {
                let in_name = recipe.name.to_lowercase().contains(&query);
                let in_description = recipe
                    .description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&query))
                    .unwrap_or(false);
                let in_tags = recipe.tags.iter().any(|t| t.to_lowercase().contains(&query));
                if !(in_name || in_description || in_tags) {
                    return false;
                }
            }
        }

        if let Some(category) = &self.category {
            if recipe.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }

        if let Some(difficulty) = self.difficulty {
            if recipe.difficulty != Some(difficulty) {
                return false;
            }
        }

        if let Some(max) = self.max_cook_time {
            if recipe.cook_time > max {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let any_tag = self
                .tags
                .iter()
                .any(|tag| recipe.tags.iter().any(|t| t == tag));
            if !any_tag {
                return false;
            }
        }

        true
    }
}
