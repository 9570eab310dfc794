//! Binding between the detection event stream and the exercise session.
//!
//! The only coupling: a confident detection matching the current exercise
//! starts the countdown; a mismatch, a background verdict, or hands leaving
//! the frame stops it.

use log::debug;
use tokio::sync::mpsc;

use crate::models::DetectionEvent;
use crate::session::ExerciseSession;

/// Apply one detection event to the session.
pub async fn apply_detection(session: &ExerciseSession, event: DetectionEvent) {
    match event {
        DetectionEvent::DetectingAction => {
            debug!("detection pending, no session change");
        }
        DetectionEvent::HandsNotInFrame => {
            session.stop_countdown().await;
        }
        DetectionEvent::ActionDetected(label) => {
            let current = session.current_exercise().await;
            let matches = label
                .exercise_name()
                .map(|name| name == current.name)
                .unwrap_or(false);

            if matches {
                // During the post-repetition grace the outcome is ignored;
                // the rollover re-arms the session.
                if session.is_ready_to_start().await {
                    session.start_countdown().await;
                }
            } else {
                session.stop_countdown().await;
            }
        }
    }
}

/// Drain the event stream into the session until the detector goes away.
pub async fn run_coach(
    mut events: mpsc::UnboundedReceiver<DetectionEvent>,
    session: ExerciseSession,
) {
    while let Some(event) = events.recv().await {
        apply_detection(&session, event).await;
    }
}
