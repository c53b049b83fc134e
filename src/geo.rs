//! Geographic point type and great-circle distances.

/// Mean Earth radius used for haversine distances, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic position in decimal degrees.
///
/// Field order follows GeoJSON (`[lon, lat]`), display order is latitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Build from a GeoJSON position; extra dimensions (altitude) are ignored.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some(Self::new(*lon, *lat)),
            _ => None,
        }
    }

    pub fn to_position(self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }

    /// "lat, lon" with eight fractional digits.
    pub fn format_lat_lon(self) -> String {
        format!("{:.8}, {:.8}", self.lat, self.lon)
    }
}

impl From<[f64; 2]> for LonLat {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self::new(lon, lat)
    }
}

impl From<walkers::Position> for LonLat {
    fn from(position: walkers::Position) -> Self {
        Self::new(position.x(), position.y())
    }
}

impl From<LonLat> for walkers::Position {
    fn from(point: LonLat) -> Self {
        walkers::lon_lat(point.lon, point.lat)
    }
}

/// Haversine distance between two points in meters.
///
/// Uses `atan2(√a, √(1−a))` so near-coincident and antipodal inputs stay finite.
/// Inputs outside the usual coordinate ranges are not validated.
pub fn haversine_distance(a: LonLat, b: LonLat) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let sin_phi = (d_phi / 2.0).sin();
    let sin_lambda = (d_lambda / 2.0).sin();
    let h = (phi1.cos() * phi2.cos()).mul_add(sin_lambda * sin_lambda, sin_phi * sin_phi);
    // Rounding can push `h` a hair outside [0, 1].
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Sum of consecutive haversine distances along `points`.
pub fn path_length(points: &[LonLat]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum()
}

/// Human-readable distance: meters below 1 km, kilometers above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.2} km", meters / 1_000.0)
    }
}
