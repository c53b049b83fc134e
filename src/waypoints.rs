//! Waypoint tables built from drawn features.

use crate::draw::GeometryKind;
use crate::geo::{LonLat, haversine_distance};
use geojson::{FeatureCollection, Value};
use thiserror::Error;

/// One vertex of a drawn path, annotated with the leg distance from the previous vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub index: usize,
    pub position: LonLat,
    /// Meters from the previous waypoint; zero for the first.
    pub segment_distance_m: f64,
}

impl Waypoint {
    /// Zero-padded ordinal: `00`, `01`, … `99`, `100`.
    pub fn label(&self) -> String {
        format!("{:02}", self.index)
    }

    pub fn coordinates_label(&self) -> String {
        self.position.format_lat_lon()
    }

    /// Leg distance with two decimals, or `--` when there is no leg.
    pub fn distance_label(&self) -> String {
        if self.segment_distance_m > 0.0 {
            format!("{:.2}", self.segment_distance_m)
        } else {
            "--".to_string()
        }
    }
}

/// Annotate `points` with haversine leg distances. N points give N waypoints.
pub fn build_waypoints(points: &[LonLat]) -> Vec<Waypoint> {
    points
        .iter()
        .enumerate()
        .map(|(index, &position)| Waypoint {
            index,
            position,
            segment_distance_m: index
                .checked_sub(1)
                .map_or(0.0, |prev| haversine_distance(points[prev], position)),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaypointTable {
    pub kind: GeometryKind,
    pub title: String,
    pub rows: Vec<Waypoint>,
}

impl WaypointTable {
    pub fn new(kind: GeometryKind, title: impl Into<String>, points: &[LonLat]) -> Self {
        Self {
            kind,
            title: title.into(),
            rows: build_waypoints(points),
        }
    }

    pub fn total_distance_m(&self) -> f64 {
        self.rows.iter().map(|w| w.segment_distance_m).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("No features drawn!")]
    NoFeatures,
    #[error("The first drawn feature has no geometry.")]
    MissingGeometry,
    #[error("Cannot build waypoints from a {0} geometry.")]
    UnsupportedGeometry(&'static str),
}

/// Path of a polygon (outer ring) or line string, in `[lon, lat]` order.
fn path_of(value: &Value) -> Result<(GeometryKind, Vec<LonLat>), TableError> {
    let (kind, positions) = match value {
        Value::Polygon(rings) => (
            GeometryKind::Polygon,
            rings.first().map_or(&[][..], Vec::as_slice),
        ),
        Value::LineString(positions) => (GeometryKind::LineString, positions.as_slice()),
        other => return Err(TableError::UnsupportedGeometry(value_type_name(other))),
    };
    let points = positions
        .iter()
        .filter_map(|p| LonLat::from_position(p))
        .collect();
    Ok((kind, points))
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Waypoints of the first drawn feature, titled by its geometry type.
pub fn generate_table(collection: &FeatureCollection) -> Result<WaypointTable, TableError> {
    let feature = collection.features.first().ok_or(TableError::NoFeatures)?;
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(TableError::MissingGeometry)?;
    let (kind, points) = path_of(&geometry.value)?;
    let title = match kind {
        GeometryKind::Polygon => "Polygon Waypoints",
        GeometryKind::LineString => "LineString Waypoints",
    };
    Ok(WaypointTable::new(kind, title, &points))
}

/// Waypoints of the most recent feature when it is a polygon.
pub fn polygon_tool_table(collection: &FeatureCollection) -> Option<WaypointTable> {
    let value = &collection.features.last()?.geometry.as_ref()?.value;
    match path_of(value) {
        Ok((GeometryKind::Polygon, points)) => Some(WaypointTable::new(
            GeometryKind::Polygon,
            "Polygon Tool Coordinates",
            &points,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawMode, DrawStore};

    fn store_with(mode: DrawMode, vertices: &[LonLat]) -> DrawStore {
        let mut store = DrawStore::new();
        store.change_mode(mode);
        for v in vertices {
            store.add_vertex(*v);
        }
        assert!(store.finish().is_some());
        store
    }

    #[test]
    fn n_points_give_n_waypoints_with_consecutive_legs() {
        let points = [
            LonLat::new(-100.43, 35.0),
            LonLat::new(-100.0, 35.2),
            LonLat::new(-99.7, 34.9),
            LonLat::new(-99.7, 34.9),
        ];
        let rows = build_waypoints(&points);
        assert_eq!(rows.len(), points.len());
        assert!(rows[0].segment_distance_m.abs() < f64::EPSILON);
        for i in 1..points.len() {
            let expected = haversine_distance(points[i - 1], points[i]);
            assert!((rows[i].segment_distance_m - expected).abs() < 1e-9);
            assert!(rows[i].segment_distance_m >= 0.0);
            assert_eq!(rows[i].index, i);
        }
        assert!(build_waypoints(&[]).is_empty());
    }

    #[test]
    fn labels_match_table_format() {
        let rows = build_waypoints(&[LonLat::new(0.0, 0.0), LonLat::new(0.0, 1.0)]);
        assert_eq!(rows[0].label(), "00");
        assert_eq!(rows[1].label(), "01");
        assert_eq!(rows[0].coordinates_label(), "0.00000000, 0.00000000");
        assert_eq!(rows[1].coordinates_label(), "1.00000000, 0.00000000");
        assert_eq!(rows[0].distance_label(), "--");
        assert_eq!(rows[1].distance_label(), "111194.93");

        let far = Waypoint {
            index: 123,
            position: LonLat::new(0.0, 0.0),
            segment_distance_m: 0.0,
        };
        assert_eq!(far.label(), "123");
    }

    #[test]
    fn empty_drawing_reports_no_features() {
        let store = DrawStore::new();
        let err = generate_table(&store.get_all()).expect_err("no features");
        assert_eq!(err, TableError::NoFeatures);
        assert_eq!(err.to_string(), "No features drawn!");
    }

    #[test]
    fn polygon_table_includes_closing_leg() {
        let vertices = [
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 1.0),
        ];
        let table = generate_table(&store_with(DrawMode::DrawPolygon, &vertices).get_all())
            .expect("table");
        assert_eq!(table.kind, GeometryKind::Polygon);
        assert_eq!(table.title, "Polygon Waypoints");
        assert_eq!(table.rows.len(), 4);
        let closing = haversine_distance(vertices[2], vertices[0]);
        assert!((table.rows[3].segment_distance_m - closing).abs() < 1e-9);
        assert_eq!(table.rows[3].position, vertices[0]);
    }

    #[test]
    fn line_table_uses_first_feature() {
        let mut store = store_with(
            DrawMode::DrawLineString,
            &[LonLat::new(0.0, 0.0), LonLat::new(0.0, 1.0)],
        );
        store.change_mode(DrawMode::DrawPolygon);
        for v in [
            LonLat::new(5.0, 5.0),
            LonLat::new(6.0, 5.0),
            LonLat::new(6.0, 6.0),
        ] {
            store.add_vertex(v);
        }
        store.finish();

        let table = generate_table(&store.get_all()).expect("table");
        assert_eq!(table.kind, GeometryKind::LineString);
        assert_eq!(table.title, "LineString Waypoints");
        assert_eq!(table.rows.len(), 2);
        assert!((table.total_distance_m() - 111_195.0).abs() < 1.0);
    }

    #[test]
    fn polygon_tool_uses_last_feature_and_ignores_lines() {
        let mut store = store_with(
            DrawMode::DrawPolygon,
            &[
                LonLat::new(0.0, 0.0),
                LonLat::new(1.0, 0.0),
                LonLat::new(1.0, 1.0),
            ],
        );
        let table = polygon_tool_table(&store.get_all()).expect("polygon table");
        assert_eq!(table.title, "Polygon Tool Coordinates");
        assert_eq!(table.rows.len(), 4);

        store.change_mode(DrawMode::DrawLineString);
        store.add_vertex(LonLat::new(3.0, 3.0));
        store.add_vertex(LonLat::new(4.0, 3.0));
        store.finish();
        assert!(polygon_tool_table(&store.get_all()).is_none());
        assert!(polygon_tool_table(&DrawStore::new().get_all()).is_none());
    }

    #[test]
    fn unsupported_first_geometry_is_an_error() {
        let parsed: geojson::GeoJson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1, 2]}}
            ]
        }"#
        .parse()
        .expect("valid collection");
        let geojson::GeoJson::FeatureCollection(collection) = parsed else {
            panic!("expected a feature collection");
        };
        assert_eq!(
            generate_table(&collection),
            Err(TableError::UnsupportedGeometry("Point"))
        );
    }
}
