use crate::{
    core::{geo::Point, map::MapState, viewport::ZoomDirection},
    input::events::{InputEvent, KeyCode, MapAction},
};

/// Turns raw input into [`MapAction`]s
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Container size in pixels, needed to hit-test markers
    size: Point,
}

impl InputHandler {
    pub fn new(size: Point) -> Self {
        Self { size }
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    pub fn size(&self) -> Point {
        self.size
    }

    /// Maps one input event to an action; `None` when the event means nothing
    /// to the map (a click on empty space, an unbound key).
    pub fn handle(&self, event: &InputEvent, state: &MapState) -> Option<MapAction> {
        match event {
            InputEvent::Click { position } => state
                .markers()
                .hit_test(
                    &state.viewport(),
                    &self.size,
                    position,
                    state.config().card.hit_radius,
                )
                .map(|marker| MapAction::SelectMarker(marker.clone())),
            InputEvent::KeyPress { key } => match key {
                KeyCode::Plus => Some(MapAction::Zoom(ZoomDirection::In)),
                KeyCode::Minus => Some(MapAction::Zoom(ZoomDirection::Out)),
                KeyCode::Escape if state.selection().is_some() => Some(MapAction::ClearSelection),
                KeyCode::Escape | KeyCode::Other(_) => None,
            },
            InputEvent::ZoomButton(direction) => Some(MapAction::Zoom(*direction)),
            InputEvent::CloseCard => Some(MapAction::ClearSelection),
        }
    }

    /// Handles the event and applies the resulting action to `state`.
    /// Returns the action that was applied.
    pub fn process(
        &self,
        event: &InputEvent,
        state: &mut MapState,
    ) -> crate::Result<Option<MapAction>> {
        let Some(action) = self.handle(event, state) else {
            return Ok(None);
        };
        state.dispatch(action.clone())?;
        Ok(Some(action))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Point::new(980.0, 600.0))
    }
}
