use std::time::Duration;

/// Tuning for the windowed action-detection pipeline.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Frames per classification window (~5s of motion at the source frame rate)
    pub window_size: usize,

    /// Minimum top-label probability to accept a classification (strict greater-than)
    pub confidence_threshold: f64,

    /// Frame polling cadence; the pose source is trusted to run at this rate
    pub frame_interval: Duration,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            window_size: 150,
            confidence_threshold: 0.8,
            // 30 fps, same rate the classifier model was trained at
            frame_interval: Duration::from_millis(33),
        }
    }
}

/// Tuning for the exercise countdown state machine.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Countdown decrement cadence
    pub tick_interval: Duration,

    /// Grace delay between a finished repetition and re-arming the countdown
    pub post_completion_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            post_completion_delay: Duration::from_secs(5),
        }
    }
}
