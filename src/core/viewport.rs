use crate::constants::{BASE_LNG_SPAN, INITIAL_CENTER, INITIAL_ZOOM, MAX_ZOOM, MIN_ZOOM};
use crate::core::geo::{LatLng, Point};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Allowed zoom range for the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
}

impl ZoomLimits {
    /// Creates a zoom range, rejecting empty, non-positive or non-finite bounds
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(MapError::InvalidZoom(format!(
                "zoom limits [{}, {}] are not a positive range",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Clamps a zoom value into the range
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }

    pub fn contains(&self, zoom: f64) -> bool {
        zoom >= self.min && zoom <= self.max
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
        }
    }
}

/// Direction of a manual zoom step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// +1 for zooming in, -1 for zooming out
    pub fn sign(self) -> f64 {
        match self {
            ZoomDirection::In => 1.0,
            ZoomDirection::Out => -1.0,
        }
    }
}

/// The visible part of the map: a center and a zoom level.
///
/// Viewports are plain values. Helpers such as [`Viewport::zoomed_by`] return
/// a new viewport instead of mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
}

impl Viewport {
    /// Creates a new viewport. No clamping happens here; see [`Viewport::clamped`].
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// Same viewport with the zoom forced into `limits`
    pub fn clamped(self, limits: &ZoomLimits) -> Self {
        Self {
            center: self.center,
            zoom: limits.clamp(self.zoom),
        }
    }

    /// Same center, different zoom (clamped)
    pub fn with_zoom(self, zoom: f64, limits: &ZoomLimits) -> Self {
        Self::new(self.center, limits.clamp(zoom))
    }

    /// One manual zoom step of `step` in `direction`, clamped to `limits`
    pub fn zoomed_by(self, direction: ZoomDirection, step: f64, limits: &ZoomLimits) -> Self {
        self.with_zoom(self.zoom + direction.sign() * step, limits)
    }

    /// Rejects NaN or infinite components
    pub fn validate(&self) -> Result<()> {
        self.center.check_finite()?;
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(MapError::InvalidZoom(format!(
                "zoom {} is not a positive finite number",
                self.zoom
            )));
        }
        Ok(())
    }

    /// Pixels per degree for a container of the given width
    fn pixels_per_degree(&self, size: &Point) -> f64 {
        size.x * self.zoom / BASE_LNG_SPAN
    }

    /// Places a coordinate inside a container of `size` pixels.
    ///
    /// Plain equirectangular placement around the center; good enough for
    /// drawing markers and hit testing, not a cartographic projection.
    pub fn project(&self, lat_lng: &LatLng, size: &Point) -> Point {
        let scale = self.pixels_per_degree(size);
        Point::new(
            size.x / 2.0 + (lat_lng.lng - self.center.lng) * scale,
            size.y / 2.0 - (lat_lng.lat - self.center.lat) * scale,
        )
    }

    /// Inverse of [`Viewport::project`]
    pub fn unproject(&self, pixel: &Point, size: &Point) -> LatLng {
        let scale = self.pixels_per_degree(size);
        LatLng::new(
            self.center.lat - (pixel.y - size.y / 2.0) / scale,
            self.center.lng + (pixel.x - size.x / 2.0) / scale,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        let (lng, lat) = INITIAL_CENTER;
        Self::new(LatLng::from_lng_lat(lng, lat), INITIAL_ZOOM)
    }
}
