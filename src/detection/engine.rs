use log::warn;

use crate::config::DetectionConfig;
use crate::models::{ClassificationResult, DetectionEvent, FeatureVector, Window};

use super::window::WindowBuffer;

/// What one frame of input produced: zero or more events, and possibly a
/// completed window that still needs a classifier verdict.
#[derive(Debug)]
pub struct FrameOutcome {
    pub events: Vec<DetectionEvent>,
    pub window: Option<Window>,
}

/// Per-frame orchestration with per-engagement hysteresis.
///
/// An engagement is a contiguous run of frames with hands in view. Within
/// one engagement the engine announces `DetectingAction` at most once and
/// accepts at most one confident detection; both re-arm only when hands
/// leave the frame.
pub struct DetectionEngine {
    buffer: WindowBuffer,
    confidence_threshold: f64,
    hands_in_frame: bool,
    announced_detecting: bool,
    detected_this_engagement: bool,
}

impl DetectionEngine {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            buffer: WindowBuffer::new(config.window_size),
            confidence_threshold: config.confidence_threshold,
            hands_in_frame: false,
            announced_detecting: false,
            detected_this_engagement: false,
        }
    }

    /// Feed one frame. Buffers the feature, tracks hand-presence episodes,
    /// and returns any events plus a completed window ready for
    /// classification.
    pub fn push_frame(
        &mut self,
        hands_present: bool,
        feature: Option<FeatureVector>,
    ) -> FrameOutcome {
        let mut events = Vec::new();

        if !hands_present {
            self.buffer.reset();
            if self.hands_in_frame {
                events.push(DetectionEvent::HandsNotInFrame);
            }
            self.hands_in_frame = false;
            self.announced_detecting = false;
            self.detected_this_engagement = false;
            return FrameOutcome {
                events,
                window: None,
            };
        }

        self.hands_in_frame = true;

        if !self.announced_detecting && !self.detected_this_engagement {
            events.push(DetectionEvent::DetectingAction);
            self.announced_detecting = true;
        }

        debug_assert!(
            feature.is_some(),
            "pose source contract: feature present iff hands present"
        );
        let window = feature.and_then(|f| self.buffer.push(f));

        FrameOutcome { events, window }
    }

    /// Apply a classifier verdict for a window produced by `push_frame`.
    ///
    /// Emits `ActionDetected` only on a strict threshold pass, and only for
    /// the first confident verdict of the engagement. Everything else is
    /// dropped; buffering has already restarted from empty.
    pub fn apply_classification(&mut self, result: &ClassificationResult) -> Option<DetectionEvent> {
        if self.detected_this_engagement {
            return None;
        }

        let confidence = result.confidence();
        if confidence > self.confidence_threshold {
            self.detected_this_engagement = true;
            Some(DetectionEvent::ActionDetected(result.label))
        } else {
            warn!(
                "dropping low-confidence verdict: {} at {:.3}",
                result.label.as_str(),
                confidence
            );
            None
        }
    }

    pub fn buffered_frames(&self) -> usize {
        self.buffer.len()
    }
}
