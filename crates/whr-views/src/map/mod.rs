//! Choropleth map: projection, triangulated country layer and the view

mod layer;
mod projection;
mod view;

pub use layer::{label_visible, CountryShape, MapLayer, LABEL_AREA_FRACTION};
pub use projection::{GeoTransform, Projection, MAX_ZOOM, MIN_ZOOM};
pub use view::MapView;
