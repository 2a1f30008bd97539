pub mod card;

#[cfg(feature = "egui")]
pub mod images;
#[cfg(feature = "egui")]
pub mod style;
#[cfg(feature = "egui")]
pub mod widget;

pub use card::{ImageState, InfoCard};

#[cfg(feature = "egui")]
pub use images::ImageCache;
#[cfg(feature = "egui")]
pub use style::{CardStyle, MapStyle, MarkerStyle, ZoomControlStyle};
#[cfg(feature = "egui")]
pub use widget::MapView;
