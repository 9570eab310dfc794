use std::sync::Arc;

use log::{info, warn};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::config::SessionConfig;
use crate::models::Exercise;

use super::state::{SessionState, TickOutcome};

/// Countdown/repetition tracker over an ordered exercise list.
///
/// All state lives behind one lock; the ticker task and the delayed
/// post-repetition rollover both submit their mutations through it, so only
/// one mutation is ever in flight.
#[derive(Clone)]
pub struct ExerciseSession {
    state: Arc<Mutex<SessionState>>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    config: SessionConfig,
}

impl ExerciseSession {
    pub fn new(state: SessionState, config: SessionConfig) -> Self {
        info!("session {} starting with {} exercises", state.id, state.exercises.len());
        Self {
            state: Arc::new(Mutex::new(state)),
            ticker: Arc::new(Mutex::new(None)),
            config,
        }
    }

    /// The stock two-exercise routine with default timing.
    pub fn with_defaults() -> Self {
        Self::new(SessionState::default_session(), SessionConfig::default())
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn current_exercise(&self) -> Exercise {
        self.state.lock().await.current().clone()
    }

    pub async fn is_ready_to_start(&self) -> bool {
        self.state.lock().await.is_ready_to_start
    }

    pub async fn completion_message(&self) -> String {
        self.state.lock().await.completion_message.clone()
    }

    pub async fn is_counting_down(&self) -> bool {
        self.ticker
            .lock()
            .await
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Begin ticking once per interval. No effect if already running.
    pub async fn start_countdown(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.as_ref() {
            if !handle.is_finished() {
                return;
            }
        }

        let state = Arc::clone(&self.state);
        let tick_interval = self.config.tick_interval;
        let post_completion_delay = self.config.post_completion_delay;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the first decrement
            // should land a full interval after the countdown starts.
            interval.tick().await;

            loop {
                interval.tick().await;

                let mut guard = state.lock().await;
                match guard.tick_once() {
                    TickOutcome::CountedDown => {}
                    TickOutcome::Idle => break,
                    TickOutcome::RepetitionFinished => {
                        info!("repetition finished: {}", guard.completion_message);
                        // No await between booking the repetition and
                        // scheduling the rollover, so an abort cannot
                        // separate them. The rollover task is detached:
                        // stopping the countdown never cancels it.
                        let state = Arc::clone(&state);
                        tokio::spawn(async move {
                            time::sleep(post_completion_delay).await;
                            state.lock().await.apply_post_repetition_rollover();
                        });
                        break;
                    }
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    /// Halt the periodic ticking. Safe to call repeatedly; an already
    /// scheduled post-repetition rollover still runs.
    pub async fn stop_countdown(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }

    /// Reset one exercise to its stock target and duration. Refused while
    /// the countdown is running.
    pub async fn start_over(&self, index: usize) {
        let ticker_guard = self.ticker.lock().await;
        let running = ticker_guard
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false);
        if running {
            warn!("ignoring start_over({index}) while the countdown is running");
            return;
        }

        let mut state = self.state.lock().await;
        if index >= state.exercises.len() {
            debug_assert!(false, "start_over index {index} out of range");
            warn!("start_over index {index} out of range");
            return;
        }
        state.exercises[index].start_over();
    }
}
