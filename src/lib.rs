pub mod coach;
pub mod config;
pub mod detection;
pub mod models;
pub mod session;

pub use config::{DetectionConfig, SessionConfig};
pub use detection::{
    ActionClassifier, DetectionController, DetectionEngine, FramePose, PoseFeatureSource,
};
pub use models::{
    ActionLabel, ClassificationResult, DetectionEvent, Exercise, FeatureVector, Window,
};
pub use session::{ExerciseSession, SessionState};
