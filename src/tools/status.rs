//! ChefMate Status Tool
//!
//! Provides runtime status information about the ChefMate service, plus
//! usage instructions for AI assistants driving the tools.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Cooking assistant instructions for AI assistants
pub const COOKING_INSTRUCTIONS: &str = r#"
# ChefMate Usage Instructions

This guide explains how to browse recipes and run a guided cooking session
with the ChefMate tools.

## Browsing and Scaling

1. **Find a recipe** with `search_recipes`. Filter by free-text `query`
   (matches name, description, and tags), `category`, `difficulty`
   (easy/medium/hard), `max_cook_time` (minutes), or `tags`.
2. **Open it** with `get_recipe`. Pass `servings` to scale the recipe:
   every ingredient amount and nutrition value comes back adjusted for
   that serving count, ready to display.

### How amount scaling behaves

- Numeric amounts scale proportionally: `"2"`, `"1.5"`, `"1/2"`,
  `"2 1/4"`, and ranges like `"10-12"` all work.
- Free-text amounts (`"to taste"`, `"a pinch"`) are NOT numbers and come
  back unchanged. Do not try to scale them yourself.
- ALWAYS request a fresh `get_recipe` with the new serving count instead
  of multiplying displayed values again; re-scaling an already-scaled
  amount compounds the ratio.

## Cooking Mode

1. `start_cooking` with a recipe id (and optional `servings`). The
   response includes the full scaled ingredient list and the first step.
2. Navigate with `next_step` / `previous_step`. `moved: false` means the
   session was already at that boundary.
3. Steps with a `duration_minutes` support a countdown:
   `start_step_timer`, `pause_step_timer`, `resume_step_timer`, and
   `get_step_timer`. Moving to another step discards the timer.
4. `finish_cooking` ends the session.

Only one cooking session is active at a time; starting another replaces
the current one.

## Custom Recipes

- `add_recipe` creates a user recipe. Every ingredient needs a name and a
  free-form amount string; steps are numbered from their list order.
- `update_recipe` / `delete_recipe` work on user recipes only; the
  built-in catalog is read-only.
- `toggle_favorite` / `list_favorites` work on any recipe.
"#;

/// Current service status
#[derive(Debug, Serialize)]
pub struct ChefMateStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub catalog_path: String,
    pub catalog_size_bytes: Option<u64>,
    pub state_path: String,
    pub recipe_count: usize,
    pub cooking_session_active: bool,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks process-level status for the status tool
pub struct StatusTracker {
    start_time: Instant,
    catalog_path: PathBuf,
    state_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(catalog_path: PathBuf, state_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            catalog_path,
            state_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, recipe_count: usize, cooking_session_active: bool) -> ChefMateStatus {
        let build_info = BuildInfo::current();

        // Get catalog size if it exists
        let catalog_size_bytes = std::fs::metadata(&self.catalog_path)
            .ok()
            .map(|m| m.len());

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ChefMateStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            catalog_path: self.catalog_path.display().to_string(),
            catalog_size_bytes,
            state_path: self.state_path.display().to_string(),
            recipe_count,
            cooking_session_active,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
