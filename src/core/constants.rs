//! Core constants for the California map.
//! Keeping them in a single place makes it easier to tweak map-wide magic numbers.

/// Lowest zoom the viewport may reach.
pub const MIN_ZOOM: f64 = 1.0;

/// Highest zoom the viewport may reach.
pub const MAX_ZOOM: f64 = 10.0;

/// Manual +/- zoom step applied by the zoom buttons.
pub const ZOOM_STEP: f64 = 0.5;

/// Zoom level a marker selection animates to.
pub const MARKER_FOCUS_ZOOM: f64 = 4.0;

/// Duration of the marker focus animation in milliseconds.
pub const FOCUS_DURATION_MS: u64 = 600;

/// Initial map center as (longitude, latitude): the geographic center of the contiguous US.
pub const INITIAL_CENTER: (f64, f64) = (-98.5795, 39.8283);

/// Initial zoom level.
pub const INITIAL_ZOOM: f64 = 1.0;

/// Longitude span (degrees) visible across the map width at zoom 1.
pub const BASE_LNG_SPAN: f64 = 60.0;

/// Asset shown on the info card when a marker image fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Directory that absolute card image paths resolve against.
pub const ASSET_DIR: &str = "public";

/// Screen radius (pixels) within which a click selects a marker.
pub const MARKER_HIT_RADIUS: f64 = 8.0;

/// Decimal places used when printing coordinates on the info card.
pub const COORDINATE_PRECISION: usize = 4;
