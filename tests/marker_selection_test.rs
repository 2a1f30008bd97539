use calimap::prelude::*;

/// Selection, manual zoom and card behaviour of the full map state
#[cfg(test)]
mod marker_selection_tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn map() -> MapState {
        MapState::new(MapConfig::default()).unwrap()
    }

    /// Ticks every 16 ms from `start` until no frame is pending
    fn settle(state: &mut MapState, start: u64) -> u64 {
        let mut now = start;
        while state.needs_frame() {
            state.tick(ms(now));
            now += 16;
        }
        now
    }

    #[test]
    fn test_selecting_los_angeles_ends_exactly_on_it() {
        let mut state = map();
        state.select_marker_by_name("Los Angeles").unwrap();
        settle(&mut state, 0);

        let viewport = state.viewport();
        assert_eq!(viewport.center.lng, -118.2437);
        assert_eq!(viewport.center.lat, 34.0522);
        assert_eq!(viewport.zoom, 4.0);
        assert_eq!(state.selection().map(Marker::name), Some("Los Angeles"));
    }

    #[test]
    fn test_animation_takes_the_configured_duration() {
        let mut state = map();
        state.select_marker_by_name("San Francisco").unwrap();

        state.tick(ms(1_000));
        let halfway = state.tick(ms(1_300)).unwrap();
        assert!(state.is_animating());
        assert!((halfway.zoom - 2.5).abs() < 1e-9);

        let done = state.tick(ms(1_600)).unwrap();
        assert!(!state.is_animating());
        assert_eq!(done.zoom, 4.0);
    }

    #[test]
    fn test_zoom_buttons_step_and_clamp() {
        let mut state = map();
        for _ in 0..3 {
            state.zoom_in().unwrap();
        }
        assert_eq!(state.viewport().zoom, 2.5);

        let mut floor = map();
        floor.zoom_out().unwrap();
        assert_eq!(floor.viewport().zoom, 1.0);

        let mut ceiling = map();
        for _ in 0..40 {
            ceiling.zoom_in().unwrap();
        }
        assert_eq!(ceiling.viewport().zoom, 10.0);
    }

    #[test]
    fn test_clear_selection_keeps_viewport() {
        let mut state = map();
        state.select_marker_by_name("San Diego").unwrap();
        settle(&mut state, 0);
        let before = state.viewport();

        state.clear_selection();
        assert!(state.selection().is_none());
        assert!(state.info_card().is_none());
        assert_eq!(state.viewport(), before);
    }

    #[test]
    fn test_reselecting_restarts_from_current_viewport() {
        let mut state = map();
        state.select_marker_by_name("Sacramento").unwrap();
        state.tick(ms(0));
        let mid = state.tick(ms(200)).unwrap();
        let first = state.animator().generation();

        state.select_marker_by_name("Sacramento").unwrap();
        let transition = state.animator().active_transition().unwrap();
        assert!(state.animator().generation() > first);
        assert_eq!(transition.start_viewport, mid);
        assert_ne!(transition.start_viewport, transition.target_viewport);

        settle(&mut state, 216);
        assert_eq!(state.viewport().center.lng, -121.4944);
        assert_eq!(state.viewport().center.lat, 38.5816);
    }

    #[test]
    fn test_switching_markers_mid_flight_converges_on_latest() {
        let mut state = map();
        state.select_marker_by_name("Los Angeles").unwrap();
        state.tick(ms(0));
        state.tick(ms(250));

        state.select_marker_by_name("San Francisco").unwrap();
        settle(&mut state, 260);

        assert_eq!(state.viewport().center.lng, -122.4194);
        assert_eq!(state.viewport().center.lat, 37.7749);
        assert_eq!(state.selection().map(Marker::name), Some("San Francisco"));
    }

    #[test]
    fn test_card_for_selection() {
        let mut state = map();
        state.select_marker_by_name("Los Angeles").unwrap();

        let card = state.info_card().unwrap();
        assert_eq!(card.title(), "Los Angeles");
        assert_eq!(card.image_source(), "/1.jpg");
        assert_eq!(card.latitude_text(), "34.0522");
        assert_eq!(card.longitude_text(), "-118.2437");

        state.info_card_mut().unwrap().mark_image_failed();
        assert_eq!(state.info_card().unwrap().image_source(), "/placeholder.jpg");
    }

    #[test]
    fn test_input_flow_from_click_to_close() {
        let mut state = map();
        let handler = InputHandler::new(Point::new(980.0, 600.0));
        let sd = state.markers().get("San Diego").unwrap().clone();
        let position = state.viewport().project(&sd.position(), &handler.size());

        let applied = handler
            .process(&InputEvent::Click { position }, &mut state)
            .unwrap();
        assert_eq!(applied, Some(MapAction::SelectMarker(sd)));
        settle(&mut state, 0);

        handler
            .process(&InputEvent::KeyPress { key: KeyCode::Escape }, &mut state)
            .unwrap();
        assert!(state.selection().is_none());
        assert_eq!(state.viewport().zoom, 4.0);
    }

    #[test]
    fn test_config_file_is_loaded() {
        let path = std::env::temp_dir().join(format!(
            "calimap-config-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{ "animation": { "focus_zoom": 6 }, "zoom": { "step": 1 } }"#,
        )
        .unwrap();

        let config = MapConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut state = MapState::new(config).unwrap();
        state.zoom_in().unwrap();
        assert_eq!(state.viewport().zoom, 2.0);

        state.select_marker_by_name("Los Angeles").unwrap();
        settle(&mut state, 0);
        assert_eq!(state.viewport().zoom, 6.0);
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let err = MapConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, MapError::Io(_)));
    }
}
