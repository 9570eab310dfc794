// End-to-end flow through the real pipeline: scripted pose source ->
// detection loop -> coach binding -> exercise session, under paused tokio
// time so full engagements and countdowns run instantly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;

use stretchdesk::coach;
use stretchdesk::detection::{ActionClassifier, DetectionController, FramePose, PoseFeatureSource};
use stretchdesk::models::{ActionLabel, ClassificationResult, DetectionEvent, FeatureVector, Window};
use stretchdesk::{DetectionConfig, ExerciseSession, SessionConfig, SessionState};

/// Hand presence described as (first frame beyond the phase, hands present);
/// the last phase extends forever.
struct PhasedPoseSource {
    frame: u64,
    phases: Vec<(u64, bool)>,
}

impl PhasedPoseSource {
    fn new(phases: Vec<(u64, bool)>) -> Self {
        Self { frame: 0, phases }
    }
}

impl PoseFeatureSource for PhasedPoseSource {
    fn next_frame(&mut self) -> Result<FramePose> {
        let present = self
            .phases
            .iter()
            .find(|(end, _)| self.frame < *end)
            .or_else(|| self.phases.last())
            .map(|(_, present)| *present)
            .unwrap_or(false);
        self.frame += 1;

        if present {
            Ok(FramePose::hands(FeatureVector(vec![0.5; 63])))
        } else {
            Ok(FramePose::no_hands())
        }
    }
}

struct StubClassifier {
    label: ActionLabel,
    confidence: f64,
}

impl ActionClassifier for StubClassifier {
    fn classify(&self, window: &Window) -> Result<ClassificationResult> {
        // Windows only ever arrive full
        assert_eq!(window.len(), 150);

        let mut probabilities = HashMap::new();
        probabilities.insert(self.label, self.confidence);
        Ok(ClassificationResult {
            label: self.label,
            probabilities,
        })
    }
}

struct Harness {
    session: ExerciseSession,
    controller: DetectionController,
    seen_events: Arc<Mutex<Vec<DetectionEvent>>>,
}

fn launch(
    phases: Vec<(u64, bool)>,
    label: ActionLabel,
    confidence: f64,
) -> Harness {
    let session = ExerciseSession::new(SessionState::default_session(), SessionConfig::default());

    let mut controller = DetectionController::new();
    let mut events = controller
        .start(
            Box::new(PhasedPoseSource::new(phases)),
            Arc::new(StubClassifier { label, confidence }),
            DetectionConfig::default(),
        )
        .expect("detection starts");

    let seen_events = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen_events);
    let coach_session = session.clone();
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            seen_clone.lock().unwrap().push(event);
            coach::apply_detection(&coach_session, event).await;
        }
    });

    Harness {
        session,
        controller,
        seen_events,
    }
}

fn count(events: &[DetectionEvent], wanted: DetectionEvent) -> usize {
    events.iter().filter(|e| **e == wanted).count()
}

#[tokio::test(start_paused = true)]
async fn detection_drives_one_full_repetition() {
    let mut harness = launch(
        vec![(5, false), (u64::MAX, true)],
        ActionLabel::WristShake,
        0.95,
    );

    // Lead-in + one window (~5s) + 15s countdown + 5s grace
    tokio::time::sleep(Duration::from_secs(30)).await;
    harness.controller.stop().await.expect("detection stops");
    harness.session.stop_countdown().await;

    let events = harness.seen_events.lock().unwrap().clone();
    assert_eq!(count(&events, DetectionEvent::DetectingAction), 1);
    assert_eq!(
        count(
            &events,
            DetectionEvent::ActionDetected(ActionLabel::WristShake)
        ),
        1,
        "detection is one-shot per engagement even though windows keep classifying"
    );
    assert_eq!(count(&events, DetectionEvent::HandsNotInFrame), 0);

    let state = harness.session.snapshot().await;
    assert_eq!(state.exercises[0].completed_repetitions, 1);
    assert_eq!(state.exercises[0].time_remaining, 15);
    assert!(state.is_ready_to_start);
    assert_eq!(
        state.completion_message,
        "Congratulations! You have finished a repetition"
    );
}

#[tokio::test(start_paused = true)]
async fn hands_leaving_and_returning_allows_a_second_repetition() {
    let mut harness = launch(
        vec![(20, false), (900, true), (920, false), (u64::MAX, true)],
        ActionLabel::WristShake,
        0.95,
    );

    tokio::time::sleep(Duration::from_secs(60)).await;
    harness.controller.stop().await.expect("detection stops");
    harness.session.stop_countdown().await;

    let events = harness.seen_events.lock().unwrap().clone();
    assert_eq!(count(&events, DetectionEvent::DetectingAction), 2);
    assert_eq!(
        count(
            &events,
            DetectionEvent::ActionDetected(ActionLabel::WristShake)
        ),
        2
    );
    assert_eq!(count(&events, DetectionEvent::HandsNotInFrame), 1);

    let state = harness.session.snapshot().await;
    assert_eq!(state.exercises[0].completed_repetitions, 2);
    assert_eq!(state.exercises[0].time_remaining, 15);
    assert!(state.is_ready_to_start);
}

#[tokio::test(start_paused = true)]
async fn mismatched_action_never_starts_the_countdown() {
    let mut harness = launch(
        vec![(u64::MAX, true)],
        ActionLabel::WristCircle,
        0.9,
    );

    tokio::time::sleep(Duration::from_secs(10)).await;
    harness.controller.stop().await.expect("detection stops");

    let events = harness.seen_events.lock().unwrap().clone();
    assert_eq!(
        count(
            &events,
            DetectionEvent::ActionDetected(ActionLabel::WristCircle)
        ),
        1
    );

    let state = harness.session.snapshot().await;
    assert!(!harness.session.is_counting_down().await);
    assert_eq!(state.exercises[0].completed_repetitions, 0);
    assert_eq!(state.exercises[0].time_remaining, 15);
}
