//! GeoJSON view of the draw store (`get_all` / `set_all`).

use super::model::{DrawnFeature, Geometry};
use super::store::DrawStore;
use crate::geo::LonLat;
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject, Value, feature::Id};

/// Outcome of replacing the store's contents from GeoJSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

impl DrawStore {
    /// All finished features as a GeoJSON collection, coordinates in `[lon, lat]` order.
    pub fn get_all(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features().iter().map(feature_to_geojson).collect(),
            foreign_members: None,
        }
    }

    /// Replace every feature with the polygons and line strings found in `geojson`.
    pub fn set_all(&mut self, geojson: GeoJson) -> ImportSummary {
        self.clear_features();
        let mut summary = ImportSummary::default();
        let values: Vec<Option<Value>> = match geojson {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .map(|f| f.geometry.map(|g| g.value))
                .collect(),
            GeoJson::Feature(feature) => vec![feature.geometry.map(|g| g.value)],
            GeoJson::Geometry(geometry) => vec![Some(geometry.value)],
        };
        for value in values {
            match value.as_ref().and_then(geometry_from_value) {
                Some(geometry) => {
                    self.push_feature(geometry);
                    summary.imported += 1;
                }
                None => summary.skipped += 1,
            }
        }
        if summary.skipped > 0 {
            log::warn!(
                "GeoJSON import skipped {} unsupported or malformed features",
                summary.skipped
            );
        }
        summary
    }
}

fn feature_to_geojson(feature: &DrawnFeature) -> Feature {
    let value = match &feature.geometry {
        Geometry::Polygon(ring) => {
            Value::Polygon(vec![ring.iter().map(|p| p.to_position()).collect()])
        }
        Geometry::LineString(line) => {
            Value::LineString(line.iter().map(|p| p.to_position()).collect())
        }
    };
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(value)),
        id: Some(Id::String(feature.id.to_string())),
        properties: Some(JsonObject::new()),
        foreign_members: None,
    }
}

fn positions_to_points(positions: &[Vec<f64>]) -> Option<Vec<LonLat>> {
    positions
        .iter()
        .map(|p| LonLat::from_position(p))
        .collect()
}

fn geometry_from_value(value: &Value) -> Option<Geometry> {
    match value {
        Value::Polygon(rings) => {
            let outer = positions_to_points(rings.first()?)?;
            let geometry = Geometry::polygon_from_vertices(outer);
            (geometry.vertex_count() >= 3).then_some(geometry)
        }
        Value::LineString(positions) => {
            let line = positions_to_points(positions)?;
            (line.len() >= 2).then_some(Geometry::LineString(line))
        }
        _ => None,
    }
}
