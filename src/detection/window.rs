use crate::models::{FeatureVector, Window};

/// Accumulates per-frame features into fixed-size, non-overlapping windows.
///
/// A window is handed out exactly once, at the moment the buffer reaches
/// capacity, and the buffer restarts from empty. Nothing is retained for
/// overlap; detection resolves once every `capacity` frames.
pub struct WindowBuffer {
    frames: Vec<FeatureVector>,
    capacity: usize,
}

impl WindowBuffer {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "window capacity must be positive");
        Self {
            frames: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one frame. Returns the completed window when the buffer
    /// reaches capacity, clearing itself for the next window.
    pub fn push(&mut self, frame: FeatureVector) -> Option<Window> {
        self.frames.push(frame);
        if self.frames.len() == self.capacity {
            let frames = std::mem::replace(&mut self.frames, Vec::with_capacity(self.capacity));
            Some(Window::from_frames(frames))
        } else {
            None
        }
    }

    /// Drop partial data without producing a window. Called when hands
    /// leave the frame.
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
