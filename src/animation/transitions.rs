use crate::animation::{
    interpolation::{EasingFunction, Interpolatable},
    scheduler::Generation,
};
use crate::core::viewport::Viewport;
use crate::{MapError, Result};
use std::time::Duration;

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    /// Created, waiting for its first frame
    NotStarted,
    Running,
    Completed,
    /// Superseded by a newer transition or torn down
    Cancelled,
}

/// A single viewport animation run from one viewport to another.
///
/// The start time is stamped by the first frame the run receives, so a run
/// always opens on its start viewport and ends exactly on its target.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Generation this run was started under
    pub generation: Generation,
    /// Initial viewport state
    pub start_viewport: Viewport,
    /// Target viewport state
    pub target_viewport: Viewport,
    /// Current viewport state (interpolated)
    pub current_viewport: Viewport,
    pub duration: Duration,
    pub easing: EasingFunction,
    pub state: TransitionState,
    /// Frame time of the first tick
    pub started_at: Option<Duration>,
}

impl Transition {
    /// Create a new transition
    pub fn new(
        generation: Generation,
        from: Viewport,
        to: Viewport,
        duration: Duration,
    ) -> Result<Self> {
        if duration.is_zero() {
            return Err(MapError::InvalidDuration(duration));
        }
        from.validate()?;
        to.validate()?;

        Ok(Self {
            generation,
            start_viewport: from,
            target_viewport: to,
            current_viewport: from,
            duration,
            easing: EasingFunction::EaseInOutQuad,
            state: TransitionState::NotStarted,
            started_at: None,
        })
    }

    /// Set the easing function
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Normalized progress after `elapsed`, in [0, 1]
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Viewport `elapsed` after the start of the run
    pub fn sample(&self, elapsed: Duration) -> Viewport {
        let progress = self.progress_at(elapsed);
        if progress >= 1.0 {
            return self.target_viewport;
        }
        let eased = self.easing.apply(progress);
        self.start_viewport.lerp(&self.target_viewport, eased)
    }

    /// Advance the run to frame time `now` and return the new viewport
    pub fn update(&mut self, now: Duration) -> Viewport {
        match self.state {
            TransitionState::Completed | TransitionState::Cancelled => {
                return self.current_viewport
            }
            TransitionState::NotStarted => {
                self.started_at = Some(now);
                self.state = TransitionState::Running;
            }
            TransitionState::Running => {}
        }

        let elapsed = now.saturating_sub(self.started_at.unwrap_or(now));
        self.current_viewport = self.sample(elapsed);

        if self.progress_at(elapsed) >= 1.0 {
            self.complete();
        }

        self.current_viewport
    }

    /// Stop the transition
    pub fn stop(&mut self) {
        if !self.is_finished() {
            self.state = TransitionState::Cancelled;
        }
    }

    fn complete(&mut self) {
        self.state = TransitionState::Completed;
        self.current_viewport = self.target_viewport;
    }

    /// Check if the transition is finished
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Completed | TransitionState::Cancelled
        )
    }
}
