//! Guided cooking sessions
//!
//! Steps through a recipe in step-number order with an optional countdown
//! timer per step. All time handling takes an explicit `now` so the session
//! logic stays pure; the tool layer passes `Utc::now()`.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::models::{CookingStep, Recipe};
use crate::scaling::scale_amount;

/// Cooking session error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("recipe has no steps to cook")]
    NoSteps,

    #[error("step {step_number} has no timed duration")]
    StepHasNoDuration { step_number: u32 },

    #[error("no timer has been started for this step")]
    NoTimerStarted,

    #[error("timer is not running")]
    TimerNotRunning,

    #[error("timer is already running")]
    TimerAlreadyRunning,
}

/// Countdown timer for a single step
#[derive(Debug, Clone)]
pub struct StepTimer {
    duration: Duration,
    state: TimerState,
}

#[derive(Debug, Clone)]
enum TimerState {
    Running {
        started_at: DateTime<Utc>,
        elapsed_before: Duration,
    },
    Paused {
        elapsed: Duration,
    },
}

impl StepTimer {
    fn new(minutes: u32, now: DateTime<Utc>) -> Self {
        Self {
            duration: Duration::minutes(minutes as i64),
            state: TimerState::Running {
                started_at: now,
                elapsed_before: Duration::zero(),
            },
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        match self.state {
            TimerState::Running {
                started_at,
                elapsed_before,
            } => elapsed_before + (now - started_at),
            TimerState::Paused { elapsed } => elapsed,
        }
    }

    /// Time left on the countdown, clamped at zero
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        let remaining = self.duration - self.elapsed_at(now);
        if remaining < Duration::zero() {
            Duration::zero()
        } else {
            remaining
        }
    }

    /// Whether the countdown has run out
    pub fn is_finished_at(&self, now: DateTime<Utc>) -> bool {
        self.remaining_at(now) == Duration::zero()
    }
}

/// An in-progress cooking session for one recipe
#[derive(Debug, Clone)]
pub struct CookingSession {
    recipe: Recipe,
    steps: Vec<CookingStep>,
    target_servings: u32,
    current: usize,
    timer: Option<StepTimer>,
}

impl CookingSession {
    /// Begin a session at the first step
    pub fn start(recipe: Recipe, target_servings: u32) -> Result<Self, SessionError> {
        if recipe.steps.is_empty() {
            return Err(SessionError::NoSteps);
        }
        let steps = recipe.sorted_steps().into_iter().cloned().collect();
        Ok(Self {
            recipe,
            steps,
            target_servings: target_servings.max(1),
            current: 0,
            timer: None,
        })
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn target_servings(&self) -> u32 {
        self.target_servings
    }

    /// 1-based position of the current step
    pub fn step_position(&self) -> usize {
        self.current + 1
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> &CookingStep {
        &self.steps[self.current]
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Move to the next step; returns false when already at the end.
    /// Moving between steps discards the step timer.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.steps.len() {
            self.current += 1;
            self.timer = None;
            true
        } else {
            false
        }
    }

    /// Move to the previous step; returns false when already at the start
    pub fn back(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            self.timer = None;
            true
        } else {
            false
        }
    }

    /// Ingredient lines scaled to the session's serving count
    pub fn scaled_ingredients(&self) -> Vec<String> {
        let base = self.recipe.servings as f64;
        let target = self.target_servings as f64;
        self.recipe
            .ingredients
            .iter()
            .map(|ing| {
                let amount = scale_amount(&ing.amount, base, target);
                match &ing.unit {
                    Some(unit) => format!("{} {} {}", amount, unit, ing.name),
                    None => format!("{} {}", amount, ing.name),
                }
            })
            .collect()
    }

    /// Start the current step's countdown
    pub fn start_timer(&mut self, now: DateTime<Utc>) -> Result<&StepTimer, SessionError> {
        let step = self.current_step();
        let minutes = step.duration.ok_or(SessionError::StepHasNoDuration {
            step_number: step.step_number,
        })?;
        Ok(self.timer.insert(StepTimer::new(minutes, now)))
    }

    /// Pause the running countdown
    pub fn pause_timer(&mut self, now: DateTime<Utc>) -> Result<&StepTimer, SessionError> {
        let timer = self.timer.as_mut().ok_or(SessionError::NoTimerStarted)?;
        match timer.state {
            TimerState::Running { .. } => {
                let elapsed = timer.elapsed_at(now);
                timer.state = TimerState::Paused { elapsed };
                Ok(timer)
            }
            TimerState::Paused { .. } => Err(SessionError::TimerNotRunning),
        }
    }

    /// Resume a paused countdown
    pub fn resume_timer(&mut self, now: DateTime<Utc>) -> Result<&StepTimer, SessionError> {
        let timer = self.timer.as_mut().ok_or(SessionError::NoTimerStarted)?;
        match timer.state {
            TimerState::Paused { elapsed } => {
                timer.state = TimerState::Running {
                    started_at: now,
                    elapsed_before: elapsed,
                };
                Ok(timer)
            }
            TimerState::Running { .. } => Err(SessionError::TimerAlreadyRunning),
        }
    }

    pub fn timer(&self) -> Option<&StepTimer> {
        self.timer.as_ref()
    }
}
