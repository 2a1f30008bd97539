use crate::core::{geo::Point, viewport::ZoomDirection};
use crate::layers::marker::Marker;
use serde::{Deserialize, Serialize};

/// Raw input delivered by the host UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Primary click/tap in container coordinates
    Click { position: Point },
    /// Keyboard input
    KeyPress { key: KeyCode },
    /// One of the +/- buttons
    ZoomButton(ZoomDirection),
    /// The info card's close button
    CloseCard,
}

/// Keyboard key codes the map reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Plus,
    Minus,
    Escape,
    Other(u32),
}

/// State change requested by the user
#[derive(Debug, Clone, PartialEq)]
pub enum MapAction {
    /// Select a marker and fly to it
    SelectMarker(Marker),
    /// Step the zoom without animation
    Zoom(ZoomDirection),
    /// Close the info card
    ClearSelection,
}
