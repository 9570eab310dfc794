use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Closed set of motions the classifier can report.
///
/// Decided once at the classifier boundary from the model's string labels;
/// downstream code only ever sees this enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ActionLabel {
    WristShake,
    WristCircle,
    /// No recognized exercise motion
    Background,
}

impl ActionLabel {
    /// Map a raw model output label to the closed set. Unknown labels fold
    /// into `Background`.
    pub fn from_model_label(label: &str) -> Self {
        match label {
            "WristShake" => ActionLabel::WristShake,
            "DrawCirclesWrist" => ActionLabel::WristCircle,
            _ => ActionLabel::Background,
        }
    }

    /// Display name of the exercise this motion corresponds to, if any.
    pub fn exercise_name(&self) -> Option<&'static str> {
        match self {
            ActionLabel::WristShake => Some("Wrist Shake Exercise"),
            ActionLabel::WristCircle => Some("Wrist Circles Exercise"),
            ActionLabel::Background => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionLabel::WristShake => "WristShake",
            ActionLabel::WristCircle => "WristCircle",
            ActionLabel::Background => "Background",
        }
    }
}

/// One frame's flattened hand keypoints (x, y, confidence per joint).
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(pub Vec<f32>);

impl FeatureVector {
    pub fn values(&self) -> &[f32] {
        &self.0
    }
}

/// A fixed-size, ordered batch of per-frame features submitted to the
/// classifier as one unit. Only `WindowBuffer` constructs these, and only
/// at exactly the configured size.
#[derive(Debug, Clone)]
pub struct Window {
    frames: Vec<FeatureVector>,
}

impl Window {
    pub(crate) fn from_frames(frames: Vec<FeatureVector>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[FeatureVector] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Classifier verdict for one full window.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub label: ActionLabel,
    pub probabilities: HashMap<ActionLabel, f64>,
}

impl ClassificationResult {
    /// Probability assigned to the winning label, 0.0 if the map is missing it.
    pub fn confidence(&self) -> f64 {
        self.probabilities.get(&self.label).copied().unwrap_or(0.0)
    }
}

/// Discrete output of the detection pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "event", content = "label")]
pub enum DetectionEvent {
    /// A confident classification; `Background` means "no match", not silence.
    ActionDetected(ActionLabel),
    /// Hands left the frame. Fired once per disappearance episode.
    HandsNotInFrame,
    /// Hands are back in frame and a decision is pending. Fired once per engagement.
    DetectingAction,
}
