//! Demo driver: a scripted pose source and a canned classifier wired
//! through the real pipeline, with events traced as JSON lines.
//!
//! Run with `RUST_LOG=info cargo run` to see the countdown react to a
//! simulated wrist-shake engagement.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rand::Rng;

use stretchdesk::coach;
use stretchdesk::detection::{ActionClassifier, DetectionController, FramePose, PoseFeatureSource};
use stretchdesk::models::{ActionLabel, ClassificationResult, FeatureVector, Window};
use stretchdesk::{DetectionConfig, ExerciseSession, SessionConfig, SessionState};

/// Flattened keypoint count for one hand: 21 joints x (x, y, confidence).
const FEATURE_DIM: usize = 63;

/// Hands out of frame for a short lead-in, then steadily present with
/// jittered keypoints.
struct ScriptedPoseSource {
    frame: u64,
    lead_in_frames: u64,
}

impl PoseFeatureSource for ScriptedPoseSource {
    fn next_frame(&mut self) -> Result<FramePose> {
        self.frame += 1;
        if self.frame <= self.lead_in_frames {
            return Ok(FramePose::no_hands());
        }

        let mut rng = rand::thread_rng();
        let keypoints = (0..FEATURE_DIM)
            .map(|_| 0.5 + rng.gen_range(-0.02..0.02))
            .collect();
        Ok(FramePose::hands(FeatureVector(keypoints)))
    }
}

/// Always recognizes a wrist shake with high confidence.
struct CannedClassifier;

impl ActionClassifier for CannedClassifier {
    fn classify(&self, _window: &Window) -> Result<ClassificationResult> {
        let mut probabilities = HashMap::new();
        probabilities.insert(ActionLabel::WristShake, 0.92);
        probabilities.insert(ActionLabel::WristCircle, 0.05);
        probabilities.insert(ActionLabel::Background, 0.03);
        Ok(ClassificationResult {
            label: ActionLabel::WristShake,
            probabilities,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Shortened timing so the whole flow fits in a quick demo run
    let mut state = SessionState::default_session();
    for exercise in &mut state.exercises {
        exercise.repetition_target = 2;
        exercise.time_per_rep = 3;
        exercise.time_remaining = 3;
    }
    let session = ExerciseSession::new(
        state,
        SessionConfig {
            tick_interval: Duration::from_millis(500),
            post_completion_delay: Duration::from_secs(1),
        },
    );

    let detection_config = DetectionConfig {
        frame_interval: Duration::from_millis(2),
        ..DetectionConfig::default()
    };

    let mut controller = DetectionController::new();
    let mut events = controller.start(
        Box::new(ScriptedPoseSource {
            frame: 0,
            lead_in_frames: 30,
        }),
        Arc::new(CannedClassifier),
        detection_config,
    )?;

    let trace_session = session.clone();
    let coach_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            println!("{}", serde_json::to_string(&event).expect("event serializes"));
            coach::apply_detection(&trace_session, event).await;
        }
    });

    // Long enough for a detection, one full repetition, and the rollover
    tokio::time::sleep(Duration::from_secs(8)).await;

    controller.stop().await?;
    session.stop_countdown().await;
    coach_task.await?;

    let snapshot = session.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
