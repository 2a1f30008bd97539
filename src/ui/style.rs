use egui::{Color32, FontId, Stroke};

/// Style configuration for the map view
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Background color behind everything
    pub background_color: Color32,
    /// Lines drawn every few degrees of latitude and longitude
    pub graticule_stroke: Stroke,
    /// Spacing of the graticule in degrees
    pub graticule_spacing: f64,
    /// Colors for zoom controls
    pub zoom_controls: ZoomControlStyle,
    /// Style for markers
    pub markers: MarkerStyle,
    /// Style for the info card
    pub card: CardStyle,
}

/// Style for zoom control buttons
#[derive(Debug, Clone)]
pub struct ZoomControlStyle {
    /// Button size
    pub button_size: f32,
    /// Margin from edge
    pub margin: f32,
    /// Gap between the two buttons
    pub spacing: f32,
}

/// Style for map markers
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// Default marker color
    pub default_color: Color32,
    /// Marker radius
    pub radius: f32,
    pub border_color: Color32,
    pub border_width: f32,
    pub selected_color: Color32,
    pub hover_color: Color32,
    pub label_color: Color32,
    pub label_font: FontId,
    /// Vertical offset of the label above the marker
    pub label_offset: f32,
}

/// Style for the info card
#[derive(Debug, Clone)]
pub struct CardStyle {
    pub width: f32,
    pub image_height: f32,
    /// Distance from the bottom-left corner of the map
    pub margin: f32,
    pub rounding: f32,
    pub background_color: Color32,
    pub muted_text_color: Color32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            graticule_stroke: Stroke::new(1.0, Color32::from_rgb(0xD6, 0xD6, 0xDA)),
            graticule_spacing: 5.0,
            zoom_controls: ZoomControlStyle {
                button_size: 32.0,
                margin: 16.0,
                spacing: 8.0,
            },
            markers: MarkerStyle {
                default_color: Color32::from_rgb(0x25, 0x63, 0xEB),
                radius: 6.0,
                border_color: Color32::WHITE,
                border_width: 1.5,
                selected_color: Color32::from_rgb(0x1D, 0x4E, 0xD8),
                hover_color: Color32::from_rgb(0xEF, 0x44, 0x44),
                label_color: Color32::from_rgb(0x1F, 0x29, 0x37),
                label_font: FontId::proportional(10.0),
                label_offset: 12.0,
            },
            card: CardStyle {
                width: 320.0,
                image_height: 176.0,
                margin: 32.0,
                rounding: 12.0,
                background_color: Color32::WHITE,
                muted_text_color: Color32::from_rgb(0x6B, 0x72, 0x80),
            },
        }
    }
}
