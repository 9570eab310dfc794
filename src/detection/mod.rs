pub mod controller;
pub mod engine;
pub mod traits;
pub mod window;
pub mod worker;

pub use controller::DetectionController;
pub use engine::{DetectionEngine, FrameOutcome};
pub use traits::{ActionClassifier, FramePose, PoseFeatureSource};
pub use window::WindowBuffer;
