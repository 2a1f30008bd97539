//! The map's state container.
//!
//! [`MapState`] owns everything that changes while the map is on screen: the
//! selection, the viewport animator and its frame queue. The renderer reads
//! from it and feeds it input and frame ticks; nothing else mutates it.

use crate::{
    animation::{
        animator::ViewportAnimator,
        scheduler::{FrameQueue, Generation},
    },
    core::{
        config::MapConfig,
        viewport::{Viewport, ZoomDirection, ZoomLimits},
    },
    input::events::MapAction,
    layers::marker::{Marker, MarkerSet},
    ui::card::InfoCard,
    MapError, Result,
};
use std::time::Duration;

pub struct MapState {
    config: MapConfig,
    limits: ZoomLimits,
    markers: MarkerSet,
    selection: Option<InfoCard>,
    animator: ViewportAnimator,
    frames: FrameQueue,
}

impl MapState {
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        let limits = config.zoom_limits()?;
        let markers = config.marker_set()?;
        let animator = ViewportAnimator::new(config.initial_viewport(), limits)
            .with_easing(config.animation.easing);

        Ok(Self {
            config,
            limits,
            markers,
            selection: None,
            animator,
            frames: FrameQueue::new(),
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// The live viewport
    pub fn viewport(&self) -> Viewport {
        self.animator.viewport()
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        self.limits
    }

    /// The selected marker, if any
    pub fn selection(&self) -> Option<&Marker> {
        self.selection.as_ref().map(InfoCard::marker)
    }

    /// Card for the selected marker
    pub fn info_card(&self) -> Option<&InfoCard> {
        self.selection.as_ref()
    }

    pub fn info_card_mut(&mut self) -> Option<&mut InfoCard> {
        self.selection.as_mut()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Whether a frame tick is needed to make progress
    pub fn needs_frame(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn animator(&self) -> &ViewportAnimator {
        &self.animator
    }

    /// Selects `marker` and animates from the current viewport onto it.
    ///
    /// Selecting the marker that is already selected restarts the animation
    /// from wherever the viewport is right now.
    pub fn select_marker(&mut self, marker: &Marker) -> Result<()> {
        let target = Viewport::new(marker.position(), self.config.animation.focus_zoom);

        if self.config.animation.enable_transitions {
            self.start_animation(self.viewport(), target, self.config.animation.duration())?;
        } else {
            self.animator.cancel();
            self.animator.set_viewport(target)?;
        }

        log::info!(
            "selected marker {} at ({:.4}, {:.4})",
            marker.name(),
            marker.position().lng,
            marker.position().lat
        );
        self.selection = Some(InfoCard::new(
            marker.clone(),
            &self.config.card.placeholder_image,
        ));
        Ok(())
    }

    pub fn select_marker_by_name(&mut self, name: &str) -> Result<()> {
        let marker = self
            .markers
            .get(name)
            .cloned()
            .ok_or_else(|| MapError::UnknownMarker(name.to_string()))?;
        self.select_marker(&marker)
    }

    /// Closes the card. The viewport stays where it is.
    pub fn clear_selection(&mut self) {
        if let Some(card) = self.selection.take() {
            log::debug!("cleared selection of {}", card.marker().name());
        }
    }

    /// Starts a viewport animation, replacing any run in flight
    pub fn start_animation(
        &mut self,
        from: Viewport,
        to: Viewport,
        duration: Duration,
    ) -> Result<Generation> {
        self.animator
            .start_animation(from, to, duration, &mut self.frames)
    }

    /// Sets the viewport directly. An animation in flight is left running.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.animator.set_viewport(viewport)
    }

    /// One manual zoom step. Depending on configuration this first cancels an
    /// animation in flight so the step is not overwritten by the next frame.
    pub fn zoom(&mut self, direction: ZoomDirection) -> Result<Viewport> {
        if self.config.animation.manual_input_cancels_animation {
            self.animator.cancel();
        }
        let next = self
            .viewport()
            .zoomed_by(direction, self.config.zoom.step, &self.limits);
        self.animator.set_viewport(next)?;
        log::debug!("manual zoom {:?} -> {:.2}", direction, next.zoom);
        Ok(self.viewport())
    }

    pub fn zoom_in(&mut self) -> Result<Viewport> {
        self.zoom(ZoomDirection::In)
    }

    pub fn zoom_out(&mut self) -> Result<Viewport> {
        self.zoom(ZoomDirection::Out)
    }

    /// Applies a user action
    pub fn dispatch(&mut self, action: MapAction) -> Result<()> {
        match action {
            MapAction::SelectMarker(marker) => self.select_marker(&marker),
            MapAction::Zoom(direction) => self.zoom(direction).map(|_| ()),
            MapAction::ClearSelection => {
                self.clear_selection();
                Ok(())
            }
        }
    }

    /// Delivers one display tick at frame time `now`. Returns the viewport
    /// published during this tick, if any.
    pub fn tick(&mut self, now: Duration) -> Option<Viewport> {
        let mut published = None;
        for task in self.frames.drain() {
            if let Some(viewport) = self.animator.run_frame(task, now, &mut self.frames).viewport()
            {
                published = Some(viewport);
            }
        }
        published
    }

    /// Tears the map down. Frames still pending are dropped and any tick
    /// delivered afterwards does nothing.
    pub fn shutdown(&mut self) {
        self.animator.shutdown();
        self.frames.clear();
    }
}

impl std::fmt::Debug for MapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapState")
            .field("viewport", &self.viewport())
            .field("selection", &self.selection().map(Marker::name))
            .field("animating", &self.is_animating())
            .field("pending_frames", &self.frames.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_initial_state() {
        let state = MapState::new(MapConfig::default()).unwrap();
        assert_eq!(state.viewport(), Viewport::default());
        assert!(state.selection().is_none());
        assert!(!state.is_animating());
        assert!(!state.needs_frame());
    }

    #[test]
    fn test_unknown_marker() {
        let mut state = MapState::new(MapConfig::default()).unwrap();
        let err = state.select_marker_by_name("Fresno").unwrap_err();
        assert!(matches!(err, MapError::UnknownMarker(name) if name == "Fresno"));
        assert!(state.selection().is_none());
        assert!(!state.needs_frame());
    }

    #[test]
    fn test_select_sets_selection_and_requests_frame() {
        let mut state = MapState::new(MapConfig::default()).unwrap();
        state.select_marker_by_name("San Diego").unwrap();
        assert_eq!(state.selection().map(Marker::name), Some("San Diego"));
        assert!(state.is_animating());
        assert!(state.needs_frame());
        assert_eq!(state.info_card().map(InfoCard::title), Some("San Diego"));
    }

    #[test]
    fn test_reduced_motion_jumps() {
        let mut state = MapState::new(MapConfig::reduced_motion()).unwrap();
        state.select_marker_by_name("Sacramento").unwrap();
        assert!(!state.is_animating());
        assert!(!state.needs_frame());
        assert_eq!(state.viewport().center.lng, -121.4944);
        assert_eq!(state.viewport().center.lat, 38.5816);
        assert_eq!(state.viewport().zoom, 4.0);
    }

    #[test]
    fn test_zoom_cancels_animation_by_default() {
        let mut state = MapState::new(MapConfig::default()).unwrap();
        state.select_marker_by_name("Los Angeles").unwrap();
        state.tick(ms(0));
        state.tick(ms(100));

        let zoomed = state.zoom_in().unwrap();
        assert!(!state.is_animating());
        assert_eq!(state.tick(ms(200)), None);
        assert_eq!(state.viewport(), zoomed);
    }

    #[test]
    fn test_zoom_without_cancel_is_overwritten() {
        let mut config = MapConfig::default();
        config.animation.manual_input_cancels_animation = false;
        let mut state = MapState::new(config).unwrap();
        state.select_marker_by_name("Los Angeles").unwrap();
        state.tick(ms(0));

        let zoomed = state.zoom_in().unwrap();
        assert!(state.is_animating());
        let next = state.tick(ms(100)).unwrap();
        assert_ne!(next, zoomed);
    }

    #[test]
    fn test_shutdown_ignores_later_ticks() {
        let mut state = MapState::new(MapConfig::default()).unwrap();
        state.select_marker_by_name("Los Angeles").unwrap();
        state.tick(ms(0));
        let frozen = state.viewport();

        state.shutdown();
        assert_eq!(state.tick(ms(600)), None);
        assert_eq!(state.viewport(), frozen);
        assert!(matches!(
            state.select_marker_by_name("San Diego"),
            Err(MapError::AnimatorClosed)
        ));
    }

    #[test]
    fn test_shutdown_rejects_manual_zoom_and_instant_focus() {
        let mut state = MapState::new(MapConfig::reduced_motion()).unwrap();
        let before = state.viewport();
        state.shutdown();

        assert!(matches!(state.zoom_in(), Err(MapError::AnimatorClosed)));
        assert!(matches!(
            state.select_marker_by_name("Sacramento"),
            Err(MapError::AnimatorClosed)
        ));
        assert_eq!(state.viewport(), before);
        assert!(state.selection().is_none());
    }
}
