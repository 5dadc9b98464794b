// Map rendering and browser location

pub mod geolocation;
pub mod leaflet;
pub mod traits;

pub use leaflet::LeafletRenderer;
pub use traits::{escape_html, MapError, MapMarker, MapRenderer};
