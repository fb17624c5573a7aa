//! ChefMate MCP Server Implementation
//!
//! Implements the MCP server with all ChefMate tools.

use std::sync::Arc;

use chrono::Utc;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::cooking::CookingSession;
use crate::models::{Difficulty, IngredientDraft, Nutrition, RecipeDraft, StepDraft};
use crate::store::RecipeStore;
use crate::tools::cooking;
use crate::tools::recipes;
use crate::tools::status::StatusTracker;

/// ChefMate MCP Service
#[derive(Clone)]
pub struct ChefMateService {
    store: RecipeStore,
    status_tracker: Arc<Mutex<StatusTracker>>,
    /// The single active cooking session, if any
    session: Arc<std::sync::Mutex<Option<CookingSession>>>,
    tool_router: ToolRouter<ChefMateService>,
}

impl ChefMateService {
    pub fn new(config: &AppConfig, store: RecipeStore) -> Self {
        Self {
            store,
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                config.catalog_path.clone(),
                config.state_path.clone(),
            ))),
            session: Arc::new(std::sync::Mutex::new(None)),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRecipesParams {
    /// Free-text search over recipe name, description, and tags (optional)
    pub query: Option<String>,
    /// Exact category filter, e.g. "Dinner" (optional)
    pub category: Option<String>,
    /// Difficulty filter: easy, medium, or hard (optional)
    pub difficulty: Option<String>,
    /// Keep recipes with cook time at or under this many minutes (optional)
    pub max_cook_time: Option<u32>,
    /// Keep recipes carrying any of these tags (optional)
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe ID
    pub id: String,
    /// Target serving count; amounts and nutrition are scaled to it.
    /// Defaults to the recipe's own serving count.
    pub servings: Option<u32>,
}

/// Ingredient line for a submitted recipe
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IngredientParam {
    /// Ingredient name
    pub name: String,
    /// Free-form amount string: "2", "1.5", "1/2", "2 1/4", "10-12", "to taste"
    pub amount: String,
    /// Optional unit, e.g. "cups"
    pub unit: Option<String>,
}

/// Instruction step for a submitted recipe; numbered from list order
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StepParam {
    /// What to do in this step
    pub description: String,
    /// Minutes, when the step should get a countdown timer (optional)
    pub duration: Option<u32>,
    /// Temperature note, e.g. "200C" or "medium heat" (optional)
    pub temperature: Option<String>,
}

/// Per-serving nutrition values for a submitted recipe
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutritionParam {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sodium: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddRecipeParams {
    /// Recipe name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Cook time in minutes
    pub cook_time: u32,
    /// Prep time in minutes (optional)
    pub prep_time: Option<u32>,
    /// Serving count the amounts are written for (default 4)
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Difficulty: easy, medium, or hard (optional)
    pub difficulty: Option<String>,
    /// Category, e.g. "Dinner" (optional)
    pub category: Option<String>,
    /// Ingredient lines
    pub ingredients: Vec<IngredientParam>,
    /// Instruction steps, in order
    pub steps: Vec<StepParam>,
    /// Per-serving nutrition (optional)
    pub nutrition: Option<NutritionParam>,
    /// Tags for search (optional)
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_servings() -> u32 {
    4
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateRecipeParams {
    /// ID of the custom recipe to replace
    pub id: String,
    /// Replacement recipe content
    #[serde(flatten)]
    pub recipe: AddRecipeParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteRecipeParams {
    /// ID of the custom recipe to delete
    pub id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleFavoriteParams {
    /// Recipe ID
    pub id: String,
}

// ============================================================================
// Cooking Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartCookingParams {
    /// Recipe ID to cook
    pub recipe_id: String,
    /// Serving count to scale the ingredients to (defaults to the
    /// recipe's own serving count)
    pub servings: Option<u32>,
}

impl AddRecipeParams {
    fn into_draft(self) -> Result<RecipeDraft, McpError> {
        let difficulty = match self.difficulty {
            Some(text) => Some(Difficulty::from_str(&text).ok_or_else(|| {
                McpError::invalid_params(
                    format!("Unknown difficulty: {} (easy, medium, hard)", text),
                    None,
                )
            })?),
            None => None,
        };
        let nutrition = self.nutrition.map(|n| Nutrition {
            calories: n.calories,
            protein: n.protein,
            carbs: n.carbs,
            fat: n.fat,
            fiber: n.fiber,
            sugar: n.sugar,
            sodium: n.sodium,
        });
        Ok(RecipeDraft {
            name: self.name,
            description: self.description,
            cook_time: self.cook_time,
            prep_time: self.prep_time,
            servings: self.servings,
            difficulty,
            category: self.category,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|i| IngredientDraft {
                    name: i.name,
                    amount: i.amount,
                    unit: i.unit,
                })
                .collect(),
            steps: self
                .steps
                .into_iter()
                .map(|s| StepDraft {
                    description: s.description,
                    duration: s.duration,
                    temperature: s.temperature,
                })
                .collect(),
            nutrition,
            tags: self.tags,
        })
    }
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl ChefMateService {
    // --- Status ---

    #[tool(description = "Get the current status of the ChefMate service including build info, catalog status, and process information")]
    async fn chefmate_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let session_active = self.session.lock().unwrap().is_some();
        let status = tracker.get_status(self.store.count(), session_active);
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for browsing, scaling, and cooking recipes. Call this when starting a cooking assistance session or when unsure how to use the ChefMate tools.")]
    fn cooking_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::COOKING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(
            COOKING_INSTRUCTIONS,
        )]))
    }

    // --- Recipes ---

    #[tool(description = "Search recipes with optional free-text query, category, difficulty, max cook time, and tag filters")]
    fn search_recipes(&self, Parameters(p): Parameters<SearchRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::search_recipes(
            &self.store,
            p.query.as_deref(),
            p.category.as_deref(),
            p.difficulty.as_deref(),
            p.max_cook_time,
            p.tags,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get full recipe detail with ingredient amounts and nutrition scaled to the requested serving count")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.store, &p.id, p.servings)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(detail) => serde_json::to_string_pretty(&detail),
            None => Ok(format!(r#"{{"error": "Recipe not found", "id": "{}"}}"#, p.id)),
        }
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List recipe categories: the fixed set recipes can be filed under and the ones currently in use")]
    fn list_categories(&self) -> Result<CallToolResult, McpError> {
        let result = recipes::list_categories(&self.store);
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Add a user-created recipe to the collection")]
    fn add_recipe(&self, Parameters(p): Parameters<AddRecipeParams>) -> Result<CallToolResult, McpError> {
        let draft = p.into_draft()?;
        let result = recipes::add_recipe(&self.store, draft).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Replace a user-created recipe's content (built-in catalog recipes are read-only)")]
    fn update_recipe(&self, Parameters(p): Parameters<UpdateRecipeParams>) -> Result<CallToolResult, McpError> {
        let draft = p.recipe.into_draft()?;
        let result = recipes::update_recipe(&self.store, &p.id, draft)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a user-created recipe (built-in catalog recipes are read-only)")]
    fn delete_recipe(&self, Parameters(p): Parameters<DeleteRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::delete_recipe(&self.store, &p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Toggle a recipe's favorite mark")]
    fn toggle_favorite(&self, Parameters(p): Parameters<ToggleFavoriteParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::toggle_favorite(&self.store, &p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List favorited recipes")]
    fn list_favorites(&self) -> Result<CallToolResult, McpError> {
        let result = recipes::list_favorites(&self.store);
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Cooking Mode ---

    #[tool(description = "Start a guided cooking session for a recipe. Returns the scaled ingredient list and the first step. Replaces any active session.")]
    fn start_cooking(&self, Parameters(p): Parameters<StartCookingParams>) -> Result<CallToolResult, McpError> {
        let mut slot = self.session.lock().unwrap();
        let result = cooking::start_cooking(&self.store, &mut slot, &p.recipe_id, p.servings, Utc::now())
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the active cooking session's current step")]
    fn get_cooking_step(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session.lock().unwrap();
        let result = cooking::get_cooking_step(&mut slot, Utc::now())
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Move the cooking session to the next step (moved=false means it was already at the last step)")]
    fn next_step(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session.lock().unwrap();
        let result = cooking::next_step(&mut slot, Utc::now()).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Move the cooking session to the previous step (moved=false means it was already at the first step)")]
    fn previous_step(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session.lock().unwrap();
        let result = cooking::previous_step(&mut slot, Utc::now()).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Start the countdown timer for the current step (the step must have a duration)")]
    fn start_step_timer(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session.lock().unwrap();
        let result = cooking::start_step_timer(&mut slot, Utc::now()).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Pause the current step's running countdown timer")]
    fn pause_step_timer(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session.lock().unwrap();
        let result = cooking::pause_step_timer(&mut slot, Utc::now()).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Resume the current step's paused countdown timer")]
    fn resume_step_timer(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session.lock().unwrap();
        let result = cooking::resume_step_timer(&mut slot, Utc::now()).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the current step's countdown timer state (running/paused/finished and seconds remaining)")]
    fn get_step_timer(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session.lock().unwrap();
        let result = cooking::get_step_timer(&mut slot, Utc::now()).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "End the active cooking session")]
    fn finish_cooking(&self) -> Result<CallToolResult, McpError> {
        let mut slot = self.session.lock().unwrap();
        let result = cooking::finish_cooking(&mut slot).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for ChefMateService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "chefmate".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("ChefMate".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "ChefMate - Recipe browsing, quantity scaling, and guided cooking. \
                 IMPORTANT: Call cooking_instructions when starting a session. \
                 Browse: search_recipes, get_recipe (pass servings to scale amounts and nutrition), list_categories. \
                 Custom recipes: add_recipe, update_recipe, delete_recipe. \
                 Favorites: toggle_favorite, list_favorites. \
                 Cooking mode: start_cooking, get_cooking_step, next_step, previous_step, \
                 start/pause/resume/get_step_timer, finish_cooking. \
                 Amounts are free-form strings; non-numeric amounts like 'to taste' never scale. \
                 Always re-request get_recipe for a new serving count instead of re-scaling displayed values."
                    .into(),
            ),
        }
    }
}
