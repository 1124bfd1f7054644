use std::fmt;

use serde::{Deserialize, Serialize};

/// A finite longitude/latitude pair. Longitude comes first everywhere on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Option<Self> {
        if lng.is_finite() && lat.is_finite() {
            Some(Self { lng, lat })
        } else {
            None
        }
    }

    pub const ORIGIN: LngLat = LngLat { lng: 0., lat: 0. };

    /// The `"<lng>,<lat>"` form the backend expects.
    pub fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

impl TryFrom<[f64; 2]> for LngLat {
    type Error = &'static str;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        LngLat::new(value[0], value[1]).ok_or("Coordinate is not finite")
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(value: LngLat) -> Self {
        [value.lng, value.lat]
    }
}

/// Parses `"<lng>,<lat>"`. Anything but exactly two finite numbers is `None`.
pub fn parse_coordinates(location: &str) -> Option<LngLat> {
    let mut parts = location.split(',');
    let (Some(lng), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };

    let lng = lng.trim().parse::<f64>().ok()?;
    let lat = lat.trim().parse::<f64>().ok()?;

    LngLat::new(lng, lat)
}

/// Converts a GeoJSON position (`[lng, lat, ...]`) to a coordinate.
pub fn from_position(position: &[f64]) -> Option<LngLat> {
    match position {
        [lng, lat, ..] => LngLat::new(*lng, *lat),
        _ => None,
    }
}

/// Flattens a line geometry into drawable paths. Non-line geometries give `None`.
/// Positions that are not finite pairs are dropped from their path.
pub fn line_paths(geometry: &geojson::Geometry) -> Option<Vec<Vec<LngLat>>> {
    let to_path = |line: &Vec<Vec<f64>>| line.iter().filter_map(|p| from_position(p)).collect::<Vec<_>>();

    let paths = match &geometry.value {
        geojson::Value::LineString(line) => vec![to_path(line)],
        geojson::Value::MultiLineString(lines) => lines.iter().map(to_path).collect(),
        _ => return None,
    };

    Some(paths.into_iter().filter(|path| path.len() > 1).collect())
}
