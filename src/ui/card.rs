use crate::constants::COORDINATE_PRECISION;
use crate::layers::marker::Marker;

/// Where the card's picture currently comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Primary,
    /// The marker's own asset failed to load
    Placeholder,
}

/// Info card shown for the selected marker
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCard {
    marker: Marker,
    placeholder: String,
    image_state: ImageState,
}

impl InfoCard {
    pub fn new(marker: Marker, placeholder: &str) -> Self {
        Self {
            marker,
            placeholder: placeholder.to_string(),
            image_state: ImageState::Primary,
        }
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    pub fn title(&self) -> &str {
        self.marker.name()
    }

    pub fn image_state(&self) -> ImageState {
        self.image_state
    }

    /// Asset reference the card should display right now
    pub fn image_source(&self) -> &str {
        match self.image_state {
            ImageState::Primary => self.marker.image(),
            ImageState::Placeholder => &self.placeholder,
        }
    }

    /// Reports that [`InfoCard::image_source`] failed to load. The card falls
    /// back to the placeholder once; a failing placeholder is kept as is.
    pub fn mark_image_failed(&mut self) {
        if self.image_state == ImageState::Primary {
            log::warn!(
                "image {} for {} failed to load, using {}",
                self.marker.image(),
                self.marker.name(),
                self.placeholder
            );
            self.image_state = ImageState::Placeholder;
        }
    }

    pub fn image_alt(&self) -> String {
        format!("Pothole in {}", self.marker.name())
    }

    pub fn description(&self) -> String {
        format!(
            "A reported pothole near {}. Please take care while driving in this area.",
            self.marker.name()
        )
    }

    pub fn latitude_text(&self) -> String {
        format!("{:.*}", COORDINATE_PRECISION, self.marker.position().lat)
    }

    pub fn longitude_text(&self) -> String {
        format!("{:.*}", COORDINATE_PRECISION, self.marker.position().lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn card() -> InfoCard {
        let marker = Marker::new(
            "Los Angeles",
            LatLng::from_lng_lat(-118.2437, 34.0522),
            "/1.jpg",
        )
        .unwrap();
        InfoCard::new(marker, "/placeholder.jpg")
    }

    #[test]
    fn test_text() {
        let card = card();
        assert_eq!(card.title(), "Los Angeles");
        assert_eq!(card.latitude_text(), "34.0522");
        assert_eq!(card.longitude_text(), "-118.2437");
        assert_eq!(card.image_alt(), "Pothole in Los Angeles");
        assert!(card.description().contains("near Los Angeles"));
    }

    #[test]
    fn test_coordinates_are_padded() {
        let marker = Marker::new("Origin", LatLng::new(1.5, -2.0), "/o.jpg").unwrap();
        let card = InfoCard::new(marker, "/placeholder.jpg");
        assert_eq!(card.latitude_text(), "1.5000");
        assert_eq!(card.longitude_text(), "-2.0000");
    }

    #[test]
    fn test_image_fallback() {
        let mut card = card();
        assert_eq!(card.image_source(), "/1.jpg");

        card.mark_image_failed();
        assert_eq!(card.image_state(), ImageState::Placeholder);
        assert_eq!(card.image_source(), "/placeholder.jpg");

        card.mark_image_failed();
        assert_eq!(card.image_source(), "/placeholder.jpg");
    }
}
