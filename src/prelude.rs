//! Prelude module for common calimap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use calimap::prelude::*;`

pub use crate::core::{
    config::{
        CardConfig, InitialViewConfig, InteractionAnimationConfig, MapConfig, MotionProfile,
        ZoomConfig,
    },
    geo::{LatLng, Point},
    map::MapState,
    viewport::{Viewport, ZoomDirection, ZoomLimits},
};

pub use crate::layers::marker::{Marker, MarkerDefinition, MarkerSet};

pub use crate::input::{
    events::{InputEvent, KeyCode, MapAction},
    handler::InputHandler,
};

pub use crate::animation::{
    animator::{FrameOutcome, ViewportAnimator},
    interpolation::{EasingFunction, Interpolatable},
    scheduler::{FrameClock, FrameQueue, FrameScheduler, FrameTask, Generation},
    transitions::{Transition, TransitionState},
};

pub use crate::ui::card::{ImageState, InfoCard};

#[cfg(feature = "egui")]
pub use crate::ui::{images::ImageCache, style::MapStyle, widget::MapView};

pub use crate::{MapError, Result};

pub use std::time::Duration;
