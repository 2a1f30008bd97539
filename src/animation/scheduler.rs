//! Frame scheduling for viewport animations.
//!
//! Animations never call themselves back. Each frame is a [`FrameTask`]
//! tagged with the [`Generation`] of the run that asked for it and handed to a
//! [`FrameScheduler`]. When the host delivers the frame, the animator compares
//! the tag with its current generation and drops anything stale.

use instant::Instant;
use std::collections::VecDeque;
use std::time::Duration;

/// Monotonically increasing animation id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The generation after this one
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTask {
    pub generation: Generation,
}

impl FrameTask {
    pub fn new(generation: Generation) -> Self {
        Self { generation }
    }
}

/// Something that will deliver a frame task back to the animator on a later tick
pub trait FrameScheduler {
    fn request_frame(&mut self, task: FrameTask);
}

/// FIFO frame scheduler, drained once per display tick
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: VecDeque<FrameTask>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every task requested before this call. Tasks requested while the
    /// returned batch is being processed wait for the next tick.
    pub fn drain(&mut self) -> Vec<FrameTask> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending task
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, task: FrameTask) {
        self.pending.push_back(task);
    }
}

/// Frame timestamps relative to a fixed origin, for hosts without their own clock
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time elapsed since the clock was created
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_ordering() {
        let first = Generation::default();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.value(), 1);
        assert_eq!(second.to_string(), "#1");
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = FrameQueue::new();
        queue.request_frame(FrameTask::new(Generation::new(1)));
        queue.request_frame(FrameTask::new(Generation::new(2)));
        assert_eq!(queue.len(), 2);

        let batch = queue.drain();
        assert_eq!(
            batch,
            vec![
                FrameTask::new(Generation::new(1)),
                FrameTask::new(Generation::new(2))
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
