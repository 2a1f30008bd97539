//! The viewport animator.
//!
//! Owns the live [`Viewport`] and at most one [`Transition`]. Frames arrive as
//! [`FrameTask`]s from a [`FrameScheduler`]; a task only takes effect when
//! its generation matches the animator's current one.

use crate::animation::{
    interpolation::EasingFunction,
    scheduler::{FrameScheduler, FrameTask, Generation},
    transitions::Transition,
};
use crate::core::viewport::{Viewport, ZoomLimits};
use crate::{MapError, Result};
use std::time::Duration;

/// What a delivered frame task did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The task belonged to a superseded run (or the animator is shut down)
    Stale,
    /// A new viewport was published and another frame was requested
    Applied(Viewport),
    /// The final viewport of the run was published
    Finished(Viewport),
}

impl FrameOutcome {
    /// Viewport published by this frame, if any
    pub fn viewport(&self) -> Option<Viewport> {
        match self {
            FrameOutcome::Stale => None,
            FrameOutcome::Applied(viewport) | FrameOutcome::Finished(viewport) => Some(*viewport),
        }
    }
}

#[derive(Debug)]
pub struct ViewportAnimator {
    viewport: Viewport,
    limits: ZoomLimits,
    easing: EasingFunction,
    generation: Generation,
    run: Option<Transition>,
    closed: bool,
}

impl ViewportAnimator {
    pub fn new(initial: Viewport, limits: ZoomLimits) -> Self {
        Self {
            viewport: initial.clamped(&limits),
            limits,
            easing: EasingFunction::default(),
            generation: Generation::default(),
            run: None,
            closed: false,
        }
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// The live viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Generation of the most recently started (or cancelled) run
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_animating(&self) -> bool {
        self.run.as_ref().is_some_and(|run| !run.is_finished())
    }

    pub fn active_transition(&self) -> Option<&Transition> {
        self.run.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Starts animating from `from` to `to` over `duration`, replacing any run
    /// in flight. The first frame is requested from `scheduler`.
    pub fn start_animation<S: FrameScheduler + ?Sized>(
        &mut self,
        from: Viewport,
        to: Viewport,
        duration: Duration,
        scheduler: &mut S,
    ) -> Result<Generation> {
        if self.closed {
            return Err(MapError::AnimatorClosed);
        }

        let generation = self.generation.next();
        let transition = Transition::new(
            generation,
            from.clamped(&self.limits),
            to.clamped(&self.limits),
            duration,
        )?
        .with_easing(self.easing);

        if let Some(previous) = self.run.as_mut() {
            if !previous.is_finished() {
                log::debug!(
                    "animation {} superseded by {}",
                    previous.generation,
                    generation
                );
            }
            previous.stop();
        }

        log::debug!(
            "animation {} started: ({:.4}, {:.4}) z{:.2} -> ({:.4}, {:.4}) z{:.2} over {:?}",
            generation,
            transition.start_viewport.center.lng,
            transition.start_viewport.center.lat,
            transition.start_viewport.zoom,
            transition.target_viewport.center.lng,
            transition.target_viewport.center.lat,
            transition.target_viewport.zoom,
            duration
        );

        self.generation = generation;
        self.run = Some(transition);
        scheduler.request_frame(FrameTask::new(generation));
        Ok(generation)
    }

    /// Replaces the live viewport immediately (zoom clamped).
    ///
    /// A run in flight keeps going and will overwrite this on its next frame;
    /// call [`ViewportAnimator::cancel`] first to keep the manual value.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        if self.closed {
            return Err(MapError::AnimatorClosed);
        }
        viewport.validate()?;
        self.viewport = viewport.clamped(&self.limits);
        Ok(())
    }

    /// Cancels the run in flight, if any. Pending frame tasks become stale.
    /// Returns whether something was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.run.take() {
            Some(mut run) if !run.is_finished() => {
                run.stop();
                self.generation = self.generation.next();
                log::debug!("animation {} cancelled", run.generation);
                true
            }
            _ => false,
        }
    }

    /// Handles one delivered frame at frame time `now`
    pub fn run_frame<S: FrameScheduler + ?Sized>(
        &mut self,
        task: FrameTask,
        now: Duration,
        scheduler: &mut S,
    ) -> FrameOutcome {
        if self.closed || task.generation != self.generation {
            log::trace!("dropping stale frame for animation {}", task.generation);
            return FrameOutcome::Stale;
        }

        let Some(run) = self.run.as_mut() else {
            return FrameOutcome::Stale;
        };

        let viewport = run.update(now).clamped(&self.limits);
        self.viewport = viewport;

        if run.is_finished() {
            log::debug!("animation {} finished", run.generation);
            self.run = None;
            FrameOutcome::Finished(viewport)
        } else {
            scheduler.request_frame(task);
            FrameOutcome::Applied(viewport)
        }
    }

    /// Tears the animator down. Every pending frame task becomes a no-op and
    /// no new animation can start.
    pub fn shutdown(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.stop();
        }
        self.run = None;
        self.generation = self.generation.next();
        self.closed = true;
        log::debug!("viewport animator shut down");
    }
}

impl Default for ViewportAnimator {
    fn default() -> Self {
        Self::new(Viewport::default(), ZoomLimits::default())
    }
}
