mod basemap;
mod scale;
mod view;

pub use basemap::http_tiles;
pub use scale::scale_bar;
pub use view::{MAX_LATITUDE, MAX_ZOOM, MIN_ZOOM, MapView, meters_per_pixel};
