pub mod animator;
pub mod interpolation;
pub mod scheduler;
pub mod transitions;

// Re-export commonly used types and functions for convenience
pub use animator::{FrameOutcome, ViewportAnimator};
pub use interpolation::{EasingFunction, Interpolatable, Interpolation};
pub use scheduler::{FrameClock, FrameQueue, FrameScheduler, FrameTask, Generation};
pub use transitions::{Transition, TransitionState};
