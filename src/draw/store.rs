use super::model::{DrawEvent, DrawMode, DrawnFeature, FeatureId, Geometry};
use crate::geo::LonLat;

/// Holds finished features and the sketch currently being drawn.
#[derive(Debug, Default)]
pub struct DrawStore {
    mode: DrawMode,
    sketch: Vec<LonLat>,
    features: Vec<DrawnFeature>,
    next_id: u64,
}

impl DrawStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Vertices placed so far in the active drawing mode.
    pub fn sketch(&self) -> &[LonLat] {
        &self.sketch
    }

    /// Finished features in creation order.
    pub fn features(&self) -> &[DrawnFeature] {
        &self.features
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: FeatureId) -> Option<&DrawnFeature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Switch modes. Any unfinished sketch is dropped.
    pub fn change_mode(&mut self, mode: DrawMode) {
        if !self.sketch.is_empty() {
            log::debug!(
                "discarding {} sketch vertices on mode change",
                self.sketch.len()
            );
        }
        self.sketch.clear();
        self.mode = mode;
    }

    /// Append a vertex to the sketch. Ignored when idle or when repeating the last vertex.
    pub fn add_vertex(&mut self, point: LonLat) -> bool {
        if !self.mode.is_drawing() {
            return false;
        }
        if self.sketch.last() == Some(&point) {
            return false;
        }
        self.sketch.push(point);
        true
    }

    pub fn remove_last_vertex(&mut self) -> bool {
        self.mode.is_drawing() && self.sketch.pop().is_some()
    }

    /// Whether the sketch has enough distinct vertices to become a feature.
    pub fn can_finish(&self) -> bool {
        self.mode.is_drawing() && distinct_count(&self.sketch) >= self.mode.min_vertices()
    }

    /// Complete the sketch and return to `SimpleSelect`.
    ///
    /// A sketch with too few distinct vertices is discarded and no event is emitted.
    pub fn finish(&mut self) -> Option<DrawEvent> {
        if !self.mode.is_drawing() {
            return None;
        }
        let mode = self.mode;
        let vertices = std::mem::take(&mut self.sketch);
        self.mode = DrawMode::SimpleSelect;
        let distinct = distinct_count(&vertices);
        if distinct < mode.min_vertices() {
            log::debug!(
                "{mode}: discarded sketch with {distinct} of {} distinct vertices",
                mode.min_vertices()
            );
            return None;
        }
        let geometry = match mode {
            DrawMode::DrawPolygon => Geometry::polygon_from_vertices(vertices),
            DrawMode::DrawLineString => Geometry::LineString(vertices),
            DrawMode::SimpleSelect => return None,
        };
        let id = self.push_feature(geometry);
        log::info!("draw.create: feature {id} ({mode})");
        Some(DrawEvent::Created(id))
    }

    /// Drop the sketch and go idle.
    pub fn cancel(&mut self) {
        self.sketch.clear();
        self.mode = DrawMode::SimpleSelect;
    }

    pub fn delete(&mut self, id: FeatureId) -> Option<DrawEvent> {
        let idx = self.features.iter().position(|f| f.id == id)?;
        self.features.remove(idx);
        log::info!("draw.delete: feature {id}");
        Some(DrawEvent::Deleted(id))
    }

    /// Remove every feature, including an unfinished sketch.
    pub fn delete_all(&mut self) -> DrawEvent {
        let count = self.features.len();
        self.features.clear();
        self.cancel();
        log::info!("draw.delete: all ({count} features)");
        DrawEvent::DeletedAll
    }

    pub(super) fn push_feature(&mut self, geometry: Geometry) -> FeatureId {
        self.next_id += 1;
        let id = FeatureId(self.next_id);
        self.features.push(DrawnFeature { id, geometry });
        id
    }

    pub(super) fn clear_features(&mut self) {
        self.features.clear();
        self.cancel();
    }
}

/// Number of different positions in `points`; revisiting a vertex does not count twice.
fn distinct_count(points: &[LonLat]) -> usize {
    points
        .iter()
        .enumerate()
        .filter(|(i, p)| !points[..*i].contains(p))
        .count()
}
