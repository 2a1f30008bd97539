use crate::{
    core::{
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    MapError, Result,
};
use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Serializable marker description, coordinates as `[longitude, latitude]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDefinition {
    pub name: String,
    pub coordinates: [f64; 2],
    pub image: String,
}

impl MarkerDefinition {
    pub fn new(name: &str, lng: f64, lat: f64, image: &str) -> Self {
        Self {
            name: name.to_string(),
            coordinates: [lng, lat],
            image: image.to_string(),
        }
    }
}

/// The four reported pothole locations shown by default
pub static CALIFORNIA_MARKERS: Lazy<Vec<MarkerDefinition>> = Lazy::new(|| {
    vec![
        MarkerDefinition::new("Los Angeles", -118.2437, 34.0522, "/1.jpg"),
        MarkerDefinition::new("San Francisco", -122.4194, 37.7749, "/2.jpg"),
        MarkerDefinition::new("San Diego", -117.1611, 32.7157, "/3.jpg"),
        MarkerDefinition::new("Sacramento", -121.4944, 38.5816, "/4.jpg"),
    ]
});

/// A fixed point of interest on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    name: String,
    position: LatLng,
    image: String,
}

impl Marker {
    pub fn new(name: impl Into<String>, position: LatLng, image: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MapError::InvalidMarker(
                "marker name must not be empty".to_string(),
            ));
        }
        position.check_finite()?;
        Ok(Self {
            name,
            position,
            image: image.into(),
        })
    }

    pub fn from_definition(definition: &MarkerDefinition) -> Result<Self> {
        let [lng, lat] = definition.coordinates;
        Self::new(
            definition.name.clone(),
            LatLng::from_lng_lat(lng, lat),
            definition.image.clone(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    /// `(longitude, latitude)`
    pub fn coordinates(&self) -> (f64, f64) {
        self.position.to_lng_lat()
    }

    /// Opaque reference to the marker's display asset
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn to_definition(&self) -> MarkerDefinition {
        let (lng, lat) = self.coordinates();
        MarkerDefinition::new(&self.name, lng, lat, &self.image)
    }
}

/// Immutable collection of markers with unique names, kept in definition order
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
    by_name: FxHashMap<String, usize>,
}

impl MarkerSet {
    pub fn new(markers: Vec<Marker>) -> Result<Self> {
        let mut by_name = FxHashMap::default();
        for (index, marker) in markers.iter().enumerate() {
            if by_name.insert(marker.name.clone(), index).is_some() {
                return Err(MapError::DuplicateMarker(marker.name.clone()));
            }
        }
        Ok(Self { markers, by_name })
    }

    pub fn from_definitions(definitions: &[MarkerDefinition]) -> Result<Self> {
        let markers = definitions
            .iter()
            .map(Marker::from_definition)
            .collect::<Result<Vec<_>>>()?;
        Self::new(markers)
    }

    pub fn get(&self, name: &str) -> Option<&Marker> {
        self.by_name
            .get(name)
            .and_then(|&index| self.markers.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// The marker drawn closest to `pixel`, if it lies within `radius` pixels
    pub fn hit_test(
        &self,
        viewport: &Viewport,
        size: &Point,
        pixel: &Point,
        radius: f64,
    ) -> Option<&Marker> {
        self.markers
            .iter()
            .map(|marker| {
                let distance = viewport.project(&marker.position, size).distance_to(pixel);
                (marker, distance)
            })
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(marker, _)| marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_california_markers() {
        let markers = MarkerSet::from_definitions(&CALIFORNIA_MARKERS).unwrap();
        assert_eq!(markers.len(), 4);

        let la = markers.get("Los Angeles").unwrap();
        assert_eq!(la.coordinates(), (-118.2437, 34.0522));
        assert_eq!(la.image(), "/1.jpg");

        let names: Vec<&str> = markers.iter().map(Marker::name).collect();
        assert_eq!(
            names,
            vec!["Los Angeles", "San Francisco", "San Diego", "Sacramento"]
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let definitions = vec![
            MarkerDefinition::new("Fresno", -119.7871, 36.7378, "/5.jpg"),
            MarkerDefinition::new("Fresno", -119.0, 36.0, "/6.jpg"),
        ];
        let err = MarkerSet::from_definitions(&definitions).unwrap_err();
        assert!(matches!(err, MapError::DuplicateMarker(name) if name == "Fresno"));
    }

    #[test]
    fn test_invalid_marker_rejected() {
        assert!(Marker::new("Nowhere", LatLng::new(f64::NAN, 0.0), "/x.jpg").is_err());
        assert!(Marker::new("  ", LatLng::new(0.0, 0.0), "/x.jpg").is_err());
    }

    #[test]
    fn test_definition_roundtrip_order() {
        let marker = Marker::new("Fresno", LatLng::from_lng_lat(-119.7871, 36.7378), "/5.jpg")
            .unwrap();
        let definition = marker.to_definition();
        assert_eq!(definition.coordinates, [-119.7871, 36.7378]);
        assert_eq!(Marker::from_definition(&definition).unwrap(), marker);
    }

    #[test]
    fn test_hit_test() {
        let markers = MarkerSet::from_definitions(&CALIFORNIA_MARKERS).unwrap();
        let viewport = Viewport::new(LatLng::from_lng_lat(-120.0, 36.0), 4.0);
        let size = Point::new(800.0, 600.0);

        let sd = markers.get("San Diego").unwrap();
        let pixel = viewport.project(&sd.position(), &size);
        let near = Point::new(pixel.x + 3.0, pixel.y - 2.0);
        assert_eq!(
            markers.hit_test(&viewport, &size, &near, 8.0).map(Marker::name),
            Some("San Diego")
        );

        let far = Point::new(pixel.x + 30.0, pixel.y);
        assert!(markers.hit_test(&viewport, &size, &far, 8.0).is_none());
    }
}
