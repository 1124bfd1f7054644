use futures::future::join_all;

use crate::{
    coordinates::{line_paths, parse_coordinates, LngLat},
    error::{RequestError, SceneError},
    mapbox::{DirectionsRoute, MapService},
    trip::{LocationRole, TripResult},
};

pub const INITIAL_ZOOM: f64 = 6.;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Red,
    Green,
    Blue,
    Orange,
}

impl MarkerColor {
    pub fn css(&self) -> &'static str {
        match self {
            MarkerColor::Red => "red",
            MarkerColor::Green => "green",
            MarkerColor::Blue => "blue",
            MarkerColor::Orange => "orange",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    Pickup,
    Dropoff,
    FuelStop,
    RestStop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub kind: MarkerKind,
    pub position: LngLat,
    pub color: MarkerColor,
    /// Popup text.
    pub label: String,
    /// Number drawn on the marker itself, only for stops.
    pub number: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: f64,
    pub rounded: bool,
}

pub const SERVER_ROUTE_STYLE: LineStyle = LineStyle { color: "#1DA1F2", width: 5., rounded: true };
pub const DIRECTIONS_STYLE: LineStyle = LineStyle { color: "#3887be", width: 4., rounded: true };

/// The server-provided path, drawn on top of the directions line.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverlay {
    pub paths: Vec<Vec<LngLat>>,
    pub style: LineStyle,
}

/// Everything to draw for one trip result.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub center: LngLat,
    pub start: Option<LngLat>,
    pub pickup: Option<LngLat>,
    pub dropoff: Option<LngLat>,
    pub fuel_stops: Vec<LngLat>,
    pub rest_stops: Vec<LngLat>,
    pub markers: Vec<MarkerSpec>,
    pub directions: Option<DirectionsRoute>,
    pub overlay: Option<RouteOverlay>,
    pub warnings: Vec<String>,
}

fn required_locations(trip: &TripResult) -> Result<[&str; 3], SceneError> {
    let [current, pickup, dropoff] = LocationRole::ALL.map(|role| trip.location(role));
    match (current, pickup, dropoff) {
        (Some(current), Some(pickup), Some(dropoff)) => Ok([current, pickup, dropoff]),
        _ => {
            let err = SceneError::MissingLocations {
                current: current.map(str::to_owned),
                pickup: pickup.map(str::to_owned),
                dropoff: dropoff.map(str::to_owned),
            };
            tracing::warn!("{}", err);
            Err(err)
        }
    }
}

/// Where a new map for this trip is centred: the start coordinate, or the
/// origin when it does not parse. Fails when the map should not be created.
pub fn initial_center(trip: &TripResult) -> Result<LngLat, SceneError> {
    let [current, _, _] = required_locations(trip)?;
    Ok(parse_coordinates(current).unwrap_or(LngLat::ORIGIN))
}

/// Resolves a trip result into map primitives. Stop geocodes and the
/// directions lookup run concurrently; failed lookups are left out and
/// reported in `warnings`.
pub async fn plan_scene<S>(trip: &TripResult, service: &S) -> Result<MapScene, SceneError>
where
    S: MapService + ?Sized,
{
    let [current, pickup, dropoff] = required_locations(trip)?;

    let start = parse_coordinates(current);
    let pickup = parse_coordinates(pickup);
    let dropoff = parse_coordinates(dropoff);

    let mut warnings = Vec::new();

    let waypoints = match (start, pickup, dropoff) {
        (Some(s), Some(p), Some(d)) => Some([s, p, d]),
        _ => {
            warnings.push("Directions skipped: a trip location is not a valid coordinate".to_owned());
            None
        }
    };

    let directions = async {
        match &waypoints {
            Some(waypoints) => service.directions(waypoints).await,
            None => Ok(None),
        }
    };

    let (fuel, rest, directions) = futures::join!(
        geocode_all(service, trip.fuel_stop_locations()),
        geocode_all(service, trip.rest_stop_locations()),
        directions
    );

    let fuel_stops = collect_stops(fuel, "Fuel Stop", &mut warnings);
    let rest_stops = collect_stops(rest, "Rest Stop", &mut warnings);

    let directions = match directions {
        Ok(Some(route)) => Some(route),
        Ok(None) => {
            if waypoints.is_some() {
                warnings.push("No driving route found".to_owned());
            }
            None
        }
        Err(err) => {
            warnings.push(format!("Directions request failed: {}", err));
            None
        }
    };

    let mut markers = Vec::new();
    let mut place = |kind, position: Option<LngLat>, color, label: String, number| match position {
        Some(position) => markers.push(MarkerSpec { kind, position, color, label, number }),
        None => warnings.push(format!("Invalid coordinates for: {}", label)),
    };

    place(MarkerKind::Start, start, MarkerColor::Red, "Start Location".into(), None);
    place(MarkerKind::Pickup, pickup, MarkerColor::Green, "Pickup Point".into(), None);
    place(MarkerKind::Dropoff, dropoff, MarkerColor::Blue, "Drop-off Point".into(), None);
    for (i, stop) in fuel_stops.iter().enumerate() {
        place(MarkerKind::FuelStop, Some(*stop), MarkerColor::Orange, format!("⛽ Fuel Stop {}", i + 1), Some(i + 1));
    }
    for (i, stop) in rest_stops.iter().enumerate() {
        place(MarkerKind::RestStop, Some(*stop), MarkerColor::Blue, format!("🛑 Rest Stop {}", i + 1), Some(i + 1));
    }

    let overlay = trip.route_geometry().and_then(|geometry| match line_paths(geometry) {
        Some(paths) if !paths.is_empty() => Some(RouteOverlay { paths, style: SERVER_ROUTE_STYLE }),
        _ => {
            warnings.push("Route geometry is not a drawable line".to_owned());
            None
        }
    });

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    Ok(MapScene {
        center: start.unwrap_or(LngLat::ORIGIN),
        start,
        pickup,
        dropoff,
        fuel_stops,
        rest_stops,
        markers,
        directions,
        overlay,
        warnings,
    })
}

type Lookup = (String, Result<Option<LngLat>, RequestError>);

async fn geocode_all<S>(service: &S, addresses: &[String]) -> Vec<Lookup>
where
    S: MapService + ?Sized,
{
    join_all(addresses.iter().map(|address| async move { (address.clone(), service.geocode(address).await) })).await
}

/// Keeps the resolved stops in input order.
fn collect_stops(results: Vec<Lookup>, kind: &str, warnings: &mut Vec<String>) -> Vec<LngLat> {
    results
        .into_iter()
        .enumerate()
        .filter_map(|(i, (address, result))| match result {
            Ok(Some(point)) => Some(point),
            Ok(None) => {
                warnings.push(format!("No match for {} {} ({})", kind, i + 1, address));
                None
            }
            Err(err) => {
                warnings.push(format!("Geocoding error for {} {} ({}): {}", kind, i + 1, address, err));
                None
            }
        })
        .collect()
}
