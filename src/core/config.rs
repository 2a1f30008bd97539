//! Configuration for map behaviour
//!
//! Everything has a default matching the stock California map, so a config
//! file only needs the keys it wants to change. Motion presets work like
//! profiles: pick one and resolve it into concrete animation settings.

use crate::animation::interpolation::EasingFunction;
use crate::constants::{
    ASSET_DIR, FOCUS_DURATION_MS, INITIAL_CENTER, INITIAL_ZOOM, MARKER_FOCUS_ZOOM, MARKER_HIT_RADIUS,
    MAX_ZOOM, MIN_ZOOM, PLACEHOLDER_IMAGE, ZOOM_STEP,
};
use crate::core::{
    geo::LatLng,
    viewport::{Viewport, ZoomLimits},
};
use crate::layers::marker::{MarkerDefinition, MarkerSet, CALIFORNIA_MARKERS};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionProfile {
    /// Eased 600 ms focus animation
    Standard,
    /// No transitions: selections jump straight to the marker
    Reduced,
    Custom(InteractionAnimationConfig),
}

impl MotionProfile {
    pub fn resolve(&self) -> InteractionAnimationConfig {
        match self {
            Self::Standard => InteractionAnimationConfig {
                enable_transitions: true,
                duration_ms: FOCUS_DURATION_MS,
                focus_zoom: MARKER_FOCUS_ZOOM,
                easing: EasingFunction::EaseInOutQuad,
                manual_input_cancels_animation: true,
            },
            Self::Reduced => InteractionAnimationConfig {
                enable_transitions: false,
                duration_ms: FOCUS_DURATION_MS,
                focus_zoom: MARKER_FOCUS_ZOOM,
                easing: EasingFunction::Linear,
                manual_input_cancels_animation: true,
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionAnimationConfig {
    pub enable_transitions: bool,
    /// Length of the marker focus animation
    pub duration_ms: u64,
    /// Zoom level a selected marker is shown at
    pub focus_zoom: f64,
    pub easing: EasingFunction,
    /// Whether a zoom button press cancels a focus animation in flight
    pub manual_input_cancels_animation: bool,
}

impl InteractionAnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for InteractionAnimationConfig {
    fn default() -> Self {
        MotionProfile::default().resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    /// Increment applied by one zoom button press
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            step: ZOOM_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialViewConfig {
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
}

impl Default for InitialViewConfig {
    fn default() -> Self {
        Self {
            center: [INITIAL_CENTER.0, INITIAL_CENTER.1],
            zoom: INITIAL_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Asset shown when a marker image fails to load
    pub placeholder_image: String,
    /// Click distance in pixels that still counts as hitting a marker
    pub hit_radius: f64,
    /// Directory that absolute asset paths such as `/1.jpg` are served from
    pub asset_dir: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            hit_radius: MARKER_HIT_RADIUS,
            asset_dir: ASSET_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub zoom: ZoomConfig,
    pub initial_view: InitialViewConfig,
    pub animation: InteractionAnimationConfig,
    pub card: CardConfig,
    pub markers: Vec<MarkerDefinition>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::default(),
            initial_view: InitialViewConfig::default(),
            animation: InteractionAnimationConfig::default(),
            card: CardConfig::default(),
            markers: CALIFORNIA_MARKERS.to_vec(),
        }
    }
}

impl MapConfig {
    /// Default configuration with a different motion profile
    pub fn with_profile(profile: MotionProfile) -> Self {
        Self {
            animation: profile.resolve(),
            ..Self::default()
        }
    }

    /// Default configuration with transitions turned off
    pub fn reduced_motion() -> Self {
        Self::with_profile(MotionProfile::Reduced)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded map config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the values that the rest of the crate relies on
    pub fn validate(&self) -> Result<()> {
        let limits = self.zoom_limits()?;

        if !self.zoom.step.is_finite() || self.zoom.step <= 0.0 {
            return Err(MapError::Config(format!(
                "zoom step must be positive, got {}",
                self.zoom.step
            )));
        }
        if self.animation.enable_transitions && self.animation.duration_ms == 0 {
            return Err(MapError::Config(
                "animation duration must be positive when transitions are enabled".to_string(),
            ));
        }
        if !limits.contains(self.animation.focus_zoom) {
            return Err(MapError::Config(format!(
                "focus zoom {} is outside [{}, {}]",
                self.animation.focus_zoom, limits.min, limits.max
            )));
        }
        if !self.card.hit_radius.is_finite() || self.card.hit_radius < 0.0 {
            return Err(MapError::Config(format!(
                "hit radius must be non-negative, got {}",
                self.card.hit_radius
            )));
        }
        self.initial_viewport().validate()?;
        MarkerSet::from_definitions(&self.markers)?;
        Ok(())
    }

    pub fn zoom_limits(&self) -> Result<ZoomLimits> {
        ZoomLimits::new(self.zoom.min, self.zoom.max)
    }

    /// Starting viewport, not yet clamped
    pub fn initial_viewport(&self) -> Viewport {
        let [lng, lat] = self.initial_view.center;
        Viewport::new(LatLng::from_lng_lat(lng, lat), self.initial_view.zoom)
    }

    pub fn marker_set(&self) -> Result<MarkerSet> {
        MarkerSet::from_definitions(&self.markers)
    }
}
