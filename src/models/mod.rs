pub mod action;
pub mod exercise;

pub use action::{ActionLabel, ClassificationResult, DetectionEvent, FeatureVector, Window};
pub use exercise::Exercise;
