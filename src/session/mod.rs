pub mod controller;
pub mod state;

pub use controller::ExerciseSession;
pub use state::{SessionState, TickOutcome};
