use serde::{Deserialize, Serialize};

pub const DEFAULT_REPETITION_TARGET: u32 = 3;
pub const DEFAULT_TIME_PER_REP_SECS: u32 = 15;

/// One stretching exercise and its countdown/repetition progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub repetition_target: u32,
    pub time_per_rep: u32,
    pub time_remaining: u32,
    pub completed_repetitions: u32,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repetition_target: DEFAULT_REPETITION_TARGET,
            time_per_rep: DEFAULT_TIME_PER_REP_SECS,
            time_remaining: DEFAULT_TIME_PER_REP_SECS,
            completed_repetitions: 0,
        }
    }

    pub fn wrist_shake() -> Self {
        Self::new("Wrist Shake Exercise")
    }

    pub fn wrist_circles() -> Self {
        Self::new("Wrist Circles Exercise")
    }

    /// The exercise has begun: mid-countdown or at least one rep done.
    pub fn is_running(&self) -> bool {
        self.time_remaining != self.time_per_rep || self.completed_repetitions != 0
    }

    pub fn is_completed(&self) -> bool {
        self.completed_repetitions == self.repetition_target
    }

    /// Reset to the stock target and duration, discarding all progress.
    pub fn start_over(&mut self) {
        self.repetition_target = DEFAULT_REPETITION_TARGET;
        self.time_per_rep = DEFAULT_TIME_PER_REP_SECS;
        self.time_remaining = self.time_per_rep;
        self.completed_repetitions = 0;
    }
}
