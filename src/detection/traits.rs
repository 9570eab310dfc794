use anyhow::Result;

use crate::models::{ClassificationResult, FeatureVector, Window};

/// One frame's worth of pose output. `feature` is present iff
/// `hands_present` is true.
#[derive(Debug, Clone)]
pub struct FramePose {
    pub hands_present: bool,
    pub feature: Option<FeatureVector>,
}

impl FramePose {
    pub fn hands(feature: FeatureVector) -> Self {
        Self {
            hands_present: true,
            feature: Some(feature),
        }
    }

    pub fn no_hands() -> Self {
        Self {
            hands_present: false,
            feature: None,
        }
    }
}

/// Per-frame hand-pose extraction, polled once per video frame.
///
/// Implementations wrap whatever does the actual keypoint work (an on-device
/// vision stack, a recording, a synthetic script). Failures are logged and
/// the frame is dropped; the pipeline keeps running.
pub trait PoseFeatureSource: Send {
    fn next_frame(&mut self) -> Result<FramePose>;
}

/// Windowed action classification over a full feature window.
///
/// Deterministic for a given model version. Invoked off the frame-delivery
/// path; expected to be a bounded-latency black box.
pub trait ActionClassifier: Send + Sync {
    fn classify(&self, window: &Window) -> Result<ClassificationResult>;
}
