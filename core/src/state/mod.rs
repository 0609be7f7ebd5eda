//! Run stage tracking.
//!
//! One invocation walks `Idle → Capturing → {Executing | SkippedEmpty} → Relaying → Done`;
//! any fatal error moves it to `Aborted`. Transitions are validated and logged.

pub mod tracker;
pub mod transitions;
pub mod types;

pub use tracker::StageTracker;
pub use transitions::{StageTransition, TransitionError};
pub use types::Stage;
