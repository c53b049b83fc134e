use crate::geo::{LonLat, path_length};
use std::fmt;

/// Interaction mode of the draw store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Idle: clicks on the map do not add vertices.
    #[default]
    SimpleSelect,
    DrawPolygon,
    DrawLineString,
}

impl DrawMode {
    /// Mode name as the draw plugin spells it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SimpleSelect => "simple_select",
            Self::DrawPolygon => "draw_polygon",
            Self::DrawLineString => "draw_line_string",
        }
    }

    pub const fn is_drawing(self) -> bool {
        !matches!(self, Self::SimpleSelect)
    }

    /// Fewest distinct vertices the sketch needs before it can be finished.
    pub const fn min_vertices(self) -> usize {
        match self {
            Self::SimpleSelect => 0,
            Self::DrawPolygon => 3,
            Self::DrawLineString => 2,
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Polygon,
    LineString,
}

impl GeometryKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Polygon => "Polygon",
            Self::LineString => "LineString",
        }
    }
}

/// Geometry of a finished feature. Polygon rings are closed: the first vertex is repeated last.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Vec<LonLat>),
    LineString(Vec<LonLat>),
}

impl Geometry {
    /// Build a closed polygon ring from open vertices.
    pub fn polygon_from_vertices(mut vertices: Vec<LonLat>) -> Self {
        if let (Some(first), Some(last)) = (vertices.first().copied(), vertices.last())
            && first != *last
        {
            vertices.push(first);
        }
        Self::Polygon(vertices)
    }

    pub const fn kind(&self) -> GeometryKind {
        match self {
            Self::Polygon(_) => GeometryKind::Polygon,
            Self::LineString(_) => GeometryKind::LineString,
        }
    }

    /// Coordinates in path order (polygon rings include the closing vertex).
    pub fn coordinates(&self) -> &[LonLat] {
        match self {
            Self::Polygon(ring) | Self::LineString(ring) => ring,
        }
    }

    /// Distinct vertices the user placed.
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Polygon(ring) => ring.len().saturating_sub(1),
            Self::LineString(line) => line.len(),
        }
    }

    /// Line length, or perimeter for polygons, in meters.
    pub fn length_m(&self) -> f64 {
        path_length(self.coordinates())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnFeature {
    pub id: FeatureId,
    pub geometry: Geometry,
}

/// Notifications emitted by the store, mirroring the draw plugin's events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawEvent {
    Created(FeatureId),
    Deleted(FeatureId),
    DeletedAll,
}
