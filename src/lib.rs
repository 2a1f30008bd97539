//! # calimap
//!
//! An interactive map of California with a handful of fixed point markers.
//!
//! Selecting a marker animates the viewport onto it and exposes an info
//! card for the selection. The crate is built around a small, frame-driven
//! viewport animator: every frame task carries a generation token, so a newer
//! animation always wins over whatever an older one still had scheduled.

pub mod animation;
pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    geo::{LatLng, Point},
    map::MapState,
    viewport::{Viewport, ZoomDirection, ZoomLimits},
};

pub use crate::layers::marker::{Marker, MarkerSet};

pub use crate::input::{
    events::{InputEvent, KeyCode, MapAction},
    handler::InputHandler,
};

pub use crate::animation::{
    animator::{FrameOutcome, ViewportAnimator},
    interpolation::{EasingFunction, Interpolatable},
    scheduler::{FrameQueue, FrameScheduler, FrameTask, Generation},
    transitions::Transition,
};

pub use crate::ui::card::InfoCard;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid animation duration: {0:?}")]
    InvalidDuration(std::time::Duration),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid zoom: {0}")]
    InvalidZoom(String),

    #[error("Invalid marker: {0}")]
    InvalidMarker(String),

    #[error("Duplicate marker: {0}")]
    DuplicateMarker(String),

    #[error("Unknown marker: {0}")]
    UnknownMarker(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Animator has been shut down")]
    AnimatorClosed,

    #[error("Image decode error: {0}")]
    ImageDecode(String),
}

/// Install `env_logger` as the `log` backend, honouring `RUST_LOG`.
///
/// Calling it more than once is harmless.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
