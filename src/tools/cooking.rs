//! Cooking session tools
//!
//! Drives the single active cooking session: step navigation and per-step
//! timers. The session slot lives on the service; these functions stay
//! transport-agnostic.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cooking::{CookingSession, StepTimer};
use crate::store::RecipeStore;

/// Countdown state for the current step
#[derive(Debug, Serialize)]
pub struct TimerView {
    /// running, paused, or finished
    pub status: String,
    pub duration_seconds: i64,
    pub remaining_seconds: i64,
}

/// The current step of the active session
#[derive(Debug, Serialize)]
pub struct CookingStepResponse {
    pub recipe_id: String,
    pub recipe_name: String,
    pub target_servings: u32,
    pub step_number: u32,
    pub step_position: usize,
    pub total_steps: usize,
    pub description: String,
    pub duration_minutes: Option<u32>,
    pub temperature: Option<String>,
    pub is_last_step: bool,
    pub timer: Option<TimerView>,
}

/// Response for start_cooking
#[derive(Debug, Serialize)]
pub struct StartCookingResponse {
    /// Ingredient lines scaled to the session's serving count
    pub ingredients: Vec<String>,
    pub step: CookingStepResponse,
}

/// Response for next_step / previous_step
#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    /// False when the session was already at the boundary
    pub moved: bool,
    pub step: CookingStepResponse,
}

/// Response for finish_cooking
#[derive(Debug, Serialize)]
pub struct FinishCookingResponse {
    pub recipe_id: String,
    pub recipe_name: String,
    pub total_steps: usize,
    pub finished_at_step: usize,
}

fn timer_view(timer: &StepTimer, now: DateTime<Utc>) -> TimerView {
    let status = if timer.is_finished_at(now) {
        "finished"
    } else if timer.is_running() {
        "running"
    } else {
        "paused"
    };
    TimerView {
        status: status.to_string(),
        duration_seconds: timer.duration().num_seconds(),
        remaining_seconds: timer.remaining_at(now).num_seconds(),
    }
}

fn step_response(session: &CookingSession, now: DateTime<Utc>) -> CookingStepResponse {
    let step = session.current_step();
    CookingStepResponse {
        recipe_id: session.recipe().id.clone(),
        recipe_name: session.recipe().name.clone(),
        target_servings: session.target_servings(),
        step_number: step.step_number,
        step_position: session.step_position(),
        total_steps: session.step_count(),
        description: step.description.clone(),
        duration_minutes: step.duration,
        temperature: step.temperature.clone(),
        is_last_step: session.is_last_step(),
        timer: session.timer().map(|t| timer_view(t, now)),
    }
}

fn active(slot: &mut Option<CookingSession>) -> Result<&mut CookingSession, String> {
    slot.as_mut()
        .ok_or_else(|| "No active cooking session. Call start_cooking first.".to_string())
}

/// Start a cooking session for a recipe, replacing any active one
pub fn start_cooking(
    store: &RecipeStore,
    slot: &mut Option<CookingSession>,
    recipe_id: &str,
    servings: Option<u32>,
    now: DateTime<Utc>,
) -> Result<StartCookingResponse, String> {
    let recipe = store
        .get(recipe_id)
        .ok_or_else(|| format!("Recipe not found with id: {}", recipe_id))?;

    let target_servings = servings.unwrap_or(recipe.servings);
    let session = CookingSession::start(recipe, target_servings)
        .map_err(|e| format!("Failed to start cooking: {}", e))?;

    tracing::info!(
        recipe_id,
        target_servings = session.target_servings(),
        "cooking session started"
    );

    let response = StartCookingResponse {
        ingredients: session.scaled_ingredients(),
        step: step_response(&session, now),
    };
    *slot = Some(session);
    Ok(response)
}

/// The active session's current step
pub fn get_cooking_step(
    slot: &mut Option<CookingSession>,
    now: DateTime<Utc>,
) -> Result<CookingStepResponse, String> {
    let session = active(slot)?;
    Ok(step_response(session, now))
}

/// Move to the next step
pub fn next_step(
    slot: &mut Option<CookingSession>,
    now: DateTime<Utc>,
) -> Result<NavigateResponse, String> {
    let session = active(slot)?;
    let moved = session.advance();
    Ok(NavigateResponse {
        moved,
        step: step_response(session, now),
    })
}

/// Move to the previous step
pub fn previous_step(
    slot: &mut Option<CookingSession>,
    now: DateTime<Utc>,
) -> Result<NavigateResponse, String> {
    let session = active(slot)?;
    let moved = session.back();
    Ok(NavigateResponse {
        moved,
        step: step_response(session, now),
    })
}

/// Start the current step's countdown timer
pub fn start_step_timer(
    slot: &mut Option<CookingSession>,
    now: DateTime<Utc>,
) -> Result<TimerView, String> {
    let session = active(slot)?;
    let timer = session.start_timer(now).map_err(|e| e.to_string())?;
    Ok(timer_view(timer, now))
}

/// Pause the running countdown
pub fn pause_step_timer(
    slot: &mut Option<CookingSession>,
    now: DateTime<Utc>,
) -> Result<TimerView, String> {
    let session = active(slot)?;
    let timer = session.pause_timer(now).map_err(|e| e.to_string())?;
    Ok(timer_view(timer, now))
}

/// Resume a paused countdown
pub fn resume_step_timer(
    slot: &mut Option<CookingSession>,
    now: DateTime<Utc>,
) -> Result<TimerView, String> {
    let session = active(slot)?;
    let timer = session.resume_timer(now).map_err(|e| e.to_string())?;
    Ok(timer_view(timer, now))
}

/// The current step's countdown state
pub fn get_step_timer(
    slot: &mut Option<CookingSession>,
    now: DateTime<Utc>,
) -> Result<TimerView, String> {
    let session = active(slot)?;
    let timer = session
        .timer()
        .ok_or_else(|| "No timer has been started for this step.".to_string())?;
    Ok(timer_view(timer, now))
}

/// End the active session
pub fn finish_cooking(slot: &mut Option<CookingSession>) -> Result<FinishCookingResponse, String> {
    let session = slot
        .take()
        .ok_or_else(|| "No active cooking session.".to_string())?;

    tracing::info!(recipe_id = %session.recipe().id, "cooking session finished");

    Ok(FinishCookingResponse {
        recipe_id: session.recipe().id.clone(),
        recipe_name: session.recipe().name.clone(),
        total_steps: session.step_count(),
        finished_at_step: session.step_position(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chrono::TimeZone;
    use std::fs;

    fn store(name: &str) -> RecipeStore {
        let dir = std::env::temp_dir()
            .join("chefmate-cooking-tests")
            .join(format!("{}-{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        let catalog_path = dir.join("catalog.json");
        fs::write(
            &catalog_path,
            r#"[{
                "id": "3",
                "name": "Herb Omelette",
                "description": null,
                "cook_time": 10,
                "prep_time": 5,
                "servings": 2,
                "difficulty": "easy",
                "category": "Breakfast",
                "ingredients": [
                    { "id": "3-ing-1", "name": "Eggs", "amount": "4", "unit": null },
                    { "id": "3-ing-2", "name": "Herbs", "amount": "to taste", "unit": null }
                ],
                "steps": [
                    { "id": "3-step-1", "step_number": 1, "description": "Whisk the eggs", "duration": null, "temperature": null },
                    { "id": "3-step-2", "step_number": 2, "description": "Cook gently", "duration": 4, "temperature": "low heat" }
                ],
                "nutrition": null,
                "tags": []
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

    fn at(seconds: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 18, 0, 0).unwrap()
            + chrono::Duration::seconds(seconds as i64)
    }

    #[test]
    fn test_full_session_flow() {
        let store = store("flow");
        let mut slot = None;

        let started = start_cooking(&store, &mut slot, "3", Some(4), at(0)).unwrap();
        assert_eq!(started.ingredients, vec!["8 Eggs", "to taste Herbs"]);
        assert_eq!(started.step.step_position, 1);
        assert_eq!(started.step.total_steps, 2);
        assert!(!started.step.is_last_step);

        let forward = next_step(&mut slot, at(5)).unwrap();
        assert!(forward.moved);
        assert!(forward.step.is_last_step);

        // At the last step the session stays put
        let stuck = next_step(&mut slot, at(6)).unwrap();
        assert!(!stuck.moved);
        assert_eq!(stuck.step.step_position, 2);

        let timer = start_step_timer(&mut slot, at(10)).unwrap();
        assert_eq!(timer.status, "running");
        assert_eq!(timer.duration_seconds, 240);

        let paused = pause_step_timer(&mut slot, at(70)).unwrap();
        assert_eq!(paused.status, "paused");
        assert_eq!(paused.remaining_seconds, 180);

        let resumed = resume_step_timer(&mut slot, at(100)).unwrap();
        assert_eq!(resumed.status, "running");
        assert_eq!(resumed.remaining_seconds, 180);

        let finished = finish_cooking(&mut slot).unwrap();
        assert_eq!(finished.recipe_name, "Herb Omelette");
        assert_eq!(finished.finished_at_step, 2);
        assert!(slot.is_none());
    }

    #[test]
    fn test_errors_without_session_or_timer() {
        let store = store("errors");
        let mut slot = None;

        assert!(get_cooking_step(&mut slot, at(0)).is_err());
        assert!(finish_cooking(&mut slot).is_err());

        start_cooking(&store, &mut slot, "3", None, at(0)).unwrap();
        // First step has no duration
        let err = start_step_timer(&mut slot, at(0)).unwrap_err();
        assert!(err.contains("no timed duration"));
        assert!(get_step_timer(&mut slot, at(0)).is_err());

        let err = start_cooking(&store, &mut slot, "99", None, at(0)).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_timer_finishes() {
        let store = store("finish-timer");
        let mut slot = None;
        start_cooking(&store, &mut slot, "3", None, at(0)).unwrap();
        next_step(&mut slot, at(0)).unwrap();
        start_step_timer(&mut slot, at(0)).unwrap();

        let done = get_step_timer(&mut slot, at(241)).unwrap();
        assert_eq!(done.status, "finished");
        assert_eq!(done.remaining_seconds, 0);
    }
}
