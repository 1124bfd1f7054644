use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    config::AppConfig,
    coordinates::{line_paths, LngLat},
    error::RequestError,
    place_search::PlaceSuggestion,
};

pub const PLACE_TYPES: &str = "place,postcode,address";
pub const MAP_STYLE: &str = "mapbox/streets-v11";

/// The provider calls the components make. Implemented over HTTP in the
/// frontend and by scripted fakes in tests.
#[async_trait(?Send)]
pub trait MapService {
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceSuggestion>, RequestError>;

    /// Coordinates of the best match for an address, `None` when nothing matches.
    async fn geocode(&self, address: &str) -> Result<Option<LngLat>, RequestError>;

    async fn directions(&self, waypoints: &[LngLat]) -> Result<Option<DirectionsRoute>, RequestError>;
}

/// Builds provider URLs from the injected config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapboxEndpoints {
    base_url: String,
    access_token: String,
}

impl MapboxEndpoints {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.map_api_base_url.trim_end_matches('/').to_owned(),
            access_token: config.map_api_key.clone(),
        }
    }

    pub fn place_search_url(&self, query: &str) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json?access_token={}&autocomplete=true&types={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.access_token),
            PLACE_TYPES
        )
    }

    pub fn geocode_url(&self, address: &str) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json?access_token={}",
            self.base_url,
            urlencoding::encode(address),
            urlencoding::encode(&self.access_token)
        )
    }

    pub fn directions_url(&self, waypoints: &[LngLat]) -> String {
        let waypoints = waypoints.iter().map(LngLat::to_query_value).collect::<Vec<_>>().join(";");
        format!(
            "{}/directions/v5/mapbox/driving/{}?access_token={}&alternatives=false&geometries=geojson&overview=full&steps=true",
            self.base_url,
            waypoints,
            urlencoding::encode(&self.access_token)
        )
    }

    /// Raster tiles for the base map style, in the `{z}/{x}/{y}` template form Leaflet expects.
    pub fn tile_url_template(&self) -> String {
        format!(
            "{}/styles/v1/{}/tiles/256/{{z}}/{{x}}/{{y}}?access_token={}",
            self.base_url,
            MAP_STYLE,
            urlencoding::encode(&self.access_token)
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceResponse {
    #[serde(default)]
    pub features: Vec<PlaceSuggestion>,
}

impl PlaceResponse {
    pub fn first_center(&self) -> Option<LngLat> {
        self.features.first().map(|feature| feature.center)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRoute {
    pub path: Vec<LngLat>,
    pub distance_m: f64,
    pub duration_s: f64,
    /// Turn-by-turn maneuver texts, all legs in order.
    pub instructions: Vec<String>,
}

impl DirectionsRoute {
    pub fn describe(&self) -> String {
        let minutes = (self.duration_s / 60.).round() as u64;
        format!("{:.1} km, {}h {:02}m", self.distance_m / 1000., minutes / 60, minutes % 60)
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
    geometry: geojson::Geometry,
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    maneuver: RawManeuver,
}

#[derive(Debug, Deserialize)]
struct RawManeuver {
    #[serde(default)]
    instruction: String,
}

impl DirectionsResponse {
    /// The first route, if it has a drawable line.
    pub fn into_route(self) -> Option<DirectionsRoute> {
        let route = self.routes.into_iter().next()?;
        let path = line_paths(&route.geometry)?.into_iter().flatten().collect::<Vec<_>>();
        if path.len() < 2 {
            return None;
        }

        let instructions = route
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| step.maneuver.instruction)
            .filter(|instruction| !instruction.is_empty())
            .collect();

        Some(DirectionsRoute {
            path,
            distance_m: route.distance,
            duration_s: route.duration,
            instructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> MapboxEndpoints {
        MapboxEndpoints::new(&AppConfig::new("http://api.test", "pk.token").with_map_api_base_url("https://maps.test/"))
    }

    #[test]
    fn place_search_url_requests_autocomplete() {
        assert_eq!(
            endpoints().place_search_url("Austin TX"),
            "https://maps.test/geocoding/v5/mapbox.places/Austin%20TX.json?access_token=pk.token&autocomplete=true&types=place,postcode,address"
        );
    }

    #[test]
    fn geocode_url_encodes_address() {
        assert_eq!(
            endpoints().geocode_url("12 Main St, Dallas/TX"),
            "https://maps.test/geocoding/v5/mapbox.places/12%20Main%20St%2C%20Dallas%2FTX.json?access_token=pk.token"
        );
    }

    #[test]
    fn directions_url_lists_waypoints_in_order() {
        let points = [LngLat::new(1., 2.).unwrap(), LngLat::new(3.5, 4.).unwrap(), LngLat::new(-5., 6.).unwrap()];
        assert_eq!(
            endpoints().directions_url(&points),
            "https://maps.test/directions/v5/mapbox/driving/1,2;3.5,4;-5,6?access_token=pk.token&alternatives=false&geometries=geojson&overview=full&steps=true"
        );
    }

    #[test]
    fn tile_template_keeps_placeholders() {
        assert_eq!(
            endpoints().tile_url_template(),
            "https://maps.test/styles/v1/mapbox/streets-v11/tiles/256/{z}/{x}/{y}?access_token=pk.token"
        );
    }

    #[test]
    fn geocode_url_encodes_non_ascii() {
        assert_eq!(
            endpoints().geocode_url("Köln"),
            "https://maps.test/geocoding/v5/mapbox.places/K%C3%B6ln.json?access_token=pk.token"
        );
    }

    #[test]
    fn place_response_first_center() {
        let response: PlaceResponse = serde_json::from_str(
            r#"{"type":"FeatureCollection","features":[
                {"id":"place.1","place_name":"Austin, Texas, United States","center":[-97.7431,30.2672]},
                {"id":"place.2","place_name":"Austin, Minnesota, United States","center":[-92.97,43.67]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.features.len(), 2);
        assert_eq!(response.first_center(), LngLat::new(-97.7431, 30.2672));

        let empty: PlaceResponse = serde_json::from_str(r#"{"type":"FeatureCollection"}"#).unwrap();
        assert_eq!(empty.first_center(), None);
    }

    #[test]
    fn directions_response_takes_first_route() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{"code":"Ok","routes":[
                {"distance":12500.0,"duration":5400.0,"geometry":{"type":"LineString","coordinates":[[1,2],[3,4],[5,6]]}},
                {"distance":1.0,"duration":1.0,"geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}}
            ]}"#,
        )
        .unwrap();
        let route = response.into_route().unwrap();
        assert_eq!(route.path.len(), 3);
        assert_eq!(route.distance_m, 12500.);
        assert_eq!(route.describe(), "12.5 km, 1h 30m");
        assert!(route.instructions.is_empty());
    }

    #[test]
    fn directions_collect_instructions_across_legs() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{"code":"Ok","routes":[{"distance":3000.0,"duration":300.0,
                "geometry":{"type":"LineString","coordinates":[[1,2],[3,4]]},
                "legs":[
                    {"steps":[{"maneuver":{"instruction":"Head north on Main St"}},{"maneuver":{"instruction":"Turn right onto I-35"}}]},
                    {"steps":[{"maneuver":{"type":"arrive"}},{"maneuver":{"instruction":"You have arrived at your destination"}}]}
                ]}]}"#,
        )
        .unwrap();
        let route = response.into_route().unwrap();
        assert_eq!(
            route.instructions,
            vec!["Head north on Main St", "Turn right onto I-35", "You have arrived at your destination"]
        );
    }

    #[test]
    fn directions_without_routes() {
        let response: DirectionsResponse = serde_json::from_str(r#"{"code":"NoRoute","routes":[]}"#).unwrap();
        assert_eq!(response.into_route(), None);
    }
}
