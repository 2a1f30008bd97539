use crate::{
    constants::ASSET_DIR,
    core::{
        geo::{LatLng, Point},
        map::MapState,
        viewport::{Viewport, ZoomDirection},
    },
    input::{
        events::{InputEvent, KeyCode},
        handler::InputHandler,
    },
    ui::{
        card::{ImageState, InfoCard},
        images::ImageCache,
        style::{CardStyle, MapStyle},
    },
};
use egui::{
    Align2, Color32, FontId, Order, Pos2, Rect, Response, RichText, Sense, Stroke, Ui, Vec2,
};
use std::time::Duration;

/// Vertical space reserved for the card's text and close link
const CARD_TEXT_HEIGHT: f32 = 150.0;

/// Upper bound on graticule lines per axis
const MAX_GRATICULE_LINES: usize = 200;

/// Immediate-mode view over a [`MapState`].
///
/// Every call to [`MapView::show`] is one display tick: pending animation
/// frames are delivered with egui's input clock, the map is painted, and the
/// frame's input is turned into map actions. A repaint is requested for as
/// long as the animator still has frames queued.
///
/// ```rust,ignore
/// let mut state = MapState::new(MapConfig::default())?;
/// let mut view = MapView::new();
/// egui::CentralPanel::default().show(ctx, |ui| view.show(ui, &mut state));
/// ```
pub struct MapView {
    handler: InputHandler,
    style: MapStyle,
    images: ImageCache,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    pub fn new() -> Self {
        Self {
            handler: InputHandler::default(),
            style: MapStyle::default(),
            images: ImageCache::new(ASSET_DIR),
        }
    }

    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut MapState) -> Response {
        let now = Duration::from_secs_f64(ui.input(|i| i.time).max(0.0));
        state.tick(now);

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let size = Point::new(rect.width() as f64, rect.height() as f64);
        self.handler.set_size(size);

        let viewport = state.viewport();
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.style.background_color);
        self.paint_graticule(&painter, rect, &viewport);

        let hovered = response
            .hover_pos()
            .and_then(|pos| {
                state.markers().hit_test(
                    &viewport,
                    &size,
                    &to_local(rect, pos),
                    state.config().card.hit_radius,
                )
            })
            .map(|marker| marker.name().to_string());
        self.paint_markers(&painter, rect, state, &viewport, hovered.as_deref());

        let mut events = Vec::new();
        let mut overlays = vec![self.zoom_controls(ui, rect, &mut events)];
        if let Some(card_rect) = self.info_card(ui, rect, state, &mut events) {
            overlays.push(card_rect);
        }

        // Overlay areas only claim the pointer once egui knows their size.
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if !overlays.iter().any(|overlay| overlay.contains(pos)) {
                    events.push(InputEvent::Click {
                        position: to_local(rect, pos),
                    });
                }
            }
        }

        ui.input(|i| {
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                events.push(InputEvent::KeyPress { key: KeyCode::Plus });
            }
            if i.key_pressed(egui::Key::Minus) {
                events.push(InputEvent::KeyPress { key: KeyCode::Minus });
            }
            if i.key_pressed(egui::Key::Escape) {
                events.push(InputEvent::KeyPress {
                    key: KeyCode::Escape,
                });
            }
        });

        for event in events {
            if let Err(err) = self.handler.process(&event, state) {
                log::warn!("failed to handle {:?}: {}", event, err);
            }
        }

        if state.needs_frame() {
            ui.ctx().request_repaint();
        }

        if hovered.is_some() {
            response.on_hover_cursor(egui::CursorIcon::PointingHand)
        } else {
            response
        }
    }

    fn paint_graticule(&self, painter: &egui::Painter, rect: Rect, viewport: &Viewport) {
        let spacing = self.style.graticule_spacing;
        if spacing <= 0.0 {
            return;
        }
        let size = Point::new(rect.width() as f64, rect.height() as f64);
        let north_west = viewport.unproject(&Point::new(0.0, 0.0), &size);
        let south_east = viewport.unproject(&size, &size);

        let first_lng = (north_west.lng / spacing).floor() * spacing;
        for lng in grid_lines(first_lng, south_east.lng, spacing) {
            let x = viewport.project(&LatLng::new(viewport.center.lat, lng), &size).x;
            let x = rect.left() + x as f32;
            painter.line_segment(
                [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
                self.style.graticule_stroke,
            );
        }

        let first_lat = (south_east.lat / spacing).floor() * spacing;
        for lat in grid_lines(first_lat, north_west.lat, spacing) {
            let y = viewport.project(&LatLng::new(lat, viewport.center.lng), &size).y;
            let y = rect.top() + y as f32;
            painter.line_segment(
                [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                self.style.graticule_stroke,
            );
        }
    }

    fn paint_markers(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        state: &MapState,
        viewport: &Viewport,
        hovered: Option<&str>,
    ) {
        let style = &self.style.markers;
        let size = Point::new(rect.width() as f64, rect.height() as f64);
        let selected = state.selection().map(|marker| marker.name());
        let visible = rect.expand(style.label_offset + 40.0);

        for marker in state.markers().iter() {
            let pos = to_screen(rect, viewport.project(&marker.position(), &size));
            if !visible.contains(pos) {
                continue;
            }

            let fill = if hovered == Some(marker.name()) {
                style.hover_color
            } else if selected == Some(marker.name()) {
                style.selected_color
            } else {
                style.default_color
            };

            painter.circle(
                pos,
                style.radius,
                fill,
                Stroke::new(style.border_width, style.border_color),
            );
            painter.text(
                pos - Vec2::new(0.0, style.label_offset),
                Align2::CENTER_BOTTOM,
                marker.name(),
                style.label_font.clone(),
                style.label_color,
            );
        }
    }

    /// Draws the +/- buttons above the map and returns the area they cover
    fn zoom_controls(&self, ui: &Ui, rect: Rect, events: &mut Vec<InputEvent>) -> Rect {
        let style = &self.style.zoom_controls;
        let button = Vec2::splat(style.button_size);
        let origin = Pos2::new(
            rect.right() - style.margin - style.button_size,
            rect.top() + style.margin,
        );

        egui::Area::new(ui.id().with("zoom_controls"))
            .order(Order::Foreground)
            .fixed_pos(origin)
            .show(ui.ctx(), |ui| {
                ui.spacing_mut().item_spacing = Vec2::new(0.0, style.spacing);
                if ui.add_sized(button, egui::Button::new("+")).clicked() {
                    events.push(InputEvent::ZoomButton(ZoomDirection::In));
                }
                if ui.add_sized(button, egui::Button::new("\u{2212}")).clicked() {
                    events.push(InputEvent::ZoomButton(ZoomDirection::Out));
                }
            })
            .response
            .rect
    }

    /// Draws the card for the current selection and returns its area
    fn info_card(
        &mut self,
        ui: &Ui,
        rect: Rect,
        state: &mut MapState,
        events: &mut Vec<InputEvent>,
    ) -> Option<Rect> {
        self.images.set_root(&state.config().card.asset_dir);
        let card = state.info_card_mut()?;
        let images = &mut self.images;
        let style = &self.style.card;
        let height = style.image_height + CARD_TEXT_HEIGHT;
        let origin = Pos2::new(
            rect.left() + style.margin,
            rect.bottom() - style.margin - height,
        );

        let area = egui::Area::new(ui.id().with("info_card"))
            .order(Order::Foreground)
            .fixed_pos(origin)
            .show(ui.ctx(), |ui| {
                egui::Frame::none()
                    .fill(style.background_color)
                    .rounding(style.rounding)
                    .stroke(Stroke::new(1.0, Color32::from_gray(229)))
                    .inner_margin(16.0)
                    .show(ui, |ui| {
                        ui.set_width(style.width - 32.0);
                        ui.label(RichText::new(card.title()).size(18.0).strong());
                        card_image(ui, images, card, style);
                        ui.label(RichText::new(card.description()).size(13.0));
                        ui.label(
                            RichText::new(format!("Lat: {}", card.latitude_text()))
                                .size(11.0)
                                .color(style.muted_text_color),
                        );
                        ui.label(
                            RichText::new(format!("Lng: {}", card.longitude_text()))
                                .size(11.0)
                                .color(style.muted_text_color),
                        );
                        if ui.link("Close").clicked() {
                            events.push(InputEvent::CloseCard);
                        }
                    });
            });

        Some(area.response.rect)
    }
}

/// Shows the card picture, switching to the placeholder only when the
/// marker's own image cannot be read or decoded
fn card_image(ui: &mut Ui, images: &mut ImageCache, card: &mut InfoCard, style: &CardStyle) {
    let size = Vec2::new(ui.available_width(), style.image_height);
    let mut texture = images.load(ui.ctx(), card.image_source());
    if texture.is_none() && card.image_state() == ImageState::Primary {
        card.mark_image_failed();
        texture = images.load(ui.ctx(), card.image_source());
    }

    let (image_rect, _) = ui.allocate_exact_size(size, Sense::hover());
    match texture {
        Some(texture) => {
            ui.painter().image(
                texture.id(),
                image_rect,
                Rect::from_min_size(Pos2::ZERO, Vec2::splat(1.0)),
                Color32::WHITE,
            );
        }
        None => {
            ui.painter()
                .rect_filled(image_rect, 8.0, Color32::from_gray(229));
            ui.painter().text(
                image_rect.center(),
                Align2::CENTER_CENTER,
                card.image_alt(),
                FontId::proportional(12.0),
                style.muted_text_color,
            );
        }
    }
}

fn to_local(rect: Rect, pos: Pos2) -> Point {
    Point::new((pos.x - rect.left()) as f64, (pos.y - rect.top()) as f64)
}

fn to_screen(rect: Rect, point: Point) -> Pos2 {
    Pos2::new(rect.left() + point.x as f32, rect.top() + point.y as f32)
}

/// Multiples of `spacing` from `first` up to `last`, capped
fn grid_lines(first: f64, last: f64, spacing: f64) -> impl Iterator<Item = f64> {
    (0..MAX_GRATICULE_LINES)
        .map(move |i| first + i as f64 * spacing)
        .take_while(move |value| *value <= last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_lines() {
        let lines: Vec<f64> = grid_lines(-130.0, -110.0, 5.0).collect();
        assert_eq!(lines, vec![-130.0, -125.0, -120.0, -115.0, -110.0]);
    }

    #[test]
    fn test_local_screen_roundtrip() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(300.0, 200.0));
        let local = to_local(rect, Pos2::new(110.0, 70.0));
        assert_eq!(local, Point::new(100.0, 50.0));
        assert_eq!(to_screen(rect, local), Pos2::new(110.0, 70.0));
    }
}
