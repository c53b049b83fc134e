//! Drawing interaction: modes, the in-progress sketch and finished features.

mod collection;
mod io;
mod model;
mod store;

pub use collection::ImportSummary;
pub use io::{load_drawing, save_drawing};
pub use model::{DrawEvent, DrawMode, FeatureId, Geometry, GeometryKind};
pub use store::DrawStore;
