use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Exercise;

/// What one countdown tick did to the current exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to count down; the tick was a no-op.
    Idle,
    /// Decremented, time still remaining.
    CountedDown,
    /// The decrement landed on zero: a repetition just finished and the
    /// post-repetition rollover needs to be scheduled.
    RepetitionFinished,
}

/// Progress of one continuous coaching session: the ordered exercises and
/// the countdown bookkeeping around them.
///
/// Mutated only through `ExerciseSession`; the ticker and the delayed
/// rollover both go through the same lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub exercises: Vec<Exercise>,
    pub current_index: usize,
    pub is_ready_to_start: bool,
    pub completion_message: String,
}

impl SessionState {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        debug_assert!(!exercises.is_empty(), "a session needs at least one exercise");
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            exercises,
            current_index: 0,
            is_ready_to_start: true,
            completion_message: String::new(),
        }
    }

    /// The stock two-exercise wrist routine.
    pub fn default_session() -> Self {
        Self::new(vec![Exercise::wrist_shake(), Exercise::wrist_circles()])
    }

    pub fn current(&self) -> &Exercise {
        &self.exercises[self.current_index]
    }

    pub fn all_completed(&self) -> bool {
        self.exercises.iter().all(|e| e.is_completed())
    }

    /// One countdown tick. On the decrement that lands on zero the
    /// repetition is booked and the completion message stored; the caller
    /// stops the ticker and schedules the rollover.
    pub fn tick_once(&mut self) -> TickOutcome {
        let index = self.current_index;
        let exercise = &mut self.exercises[index];

        if exercise.time_remaining == 0 {
            return TickOutcome::Idle;
        }

        exercise.time_remaining -= 1;
        if exercise.time_remaining > 0 {
            return TickOutcome::CountedDown;
        }

        exercise.completed_repetitions += 1;
        self.is_ready_to_start = false;
        self.completion_message = self.completion_message_now();
        TickOutcome::RepetitionFinished
    }

    /// Advance/reset step applied after the post-repetition grace delay,
    /// against whatever the state is at that moment.
    pub fn apply_post_repetition_rollover(&mut self) {
        if self.current().is_completed() && self.current_index < self.exercises.len() - 1 {
            self.current_index += 1;
        }

        if !self.all_completed() {
            let exercise = &mut self.exercises[self.current_index];
            exercise.time_remaining = exercise.time_per_rep;
        }

        self.is_ready_to_start = true;
    }

    fn completion_message_now(&self) -> String {
        if self.all_completed() {
            "Congratulations! You have finished all the exercises".to_string()
        } else if self.current().is_completed() {
            format!(
                "Congratulations! You have finished {}",
                self.current().name
            )
        } else {
            "Congratulations! You have finished a repetition".to_string()
        }
    }
}
