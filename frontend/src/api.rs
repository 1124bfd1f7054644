use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use trip_planner_lib::{
    mapbox::{DirectionsResponse, DirectionsRoute, MapService, MapboxEndpoints, PlaceResponse},
    place_search::PlaceSuggestion,
    trip::TripResult,
    trip_request::CreateTripRequest,
    AppConfig, LngLat, RequestError,
};

fn network_error(err: gloo_net::Error) -> RequestError {
    RequestError::Network(err.to_string())
}

async fn read_body(response: Response) -> Result<String, RequestError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error);
    RequestError::check_status(status, body)
}

pub async fn make_request<ReturnType>(url: &str) -> Result<ReturnType, RequestError>
where
    ReturnType: serde::de::DeserializeOwned,
{
    let response = Request::get(url).send().await.map_err(network_error)?;
    let body = read_body(response).await?;
    Ok(serde_json::from_str(&body)?)
}

/// One attempt, no retries.
pub async fn create_trip(config: &AppConfig, payload: &CreateTripRequest) -> Result<TripResult, RequestError> {
    let response = Request::post(&config.create_trip_url())
        .json(payload)
        .map_err(network_error)?
        .send()
        .await
        .map_err(network_error)?;

    let body = read_body(response).await?;
    Ok(TripResult::from_json(&body)?)
}

/// Place search, geocoding and directions against the Mapbox HTTP API.
#[derive(Clone)]
pub struct MapboxService {
    endpoints: MapboxEndpoints,
}

impl MapboxService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            endpoints: MapboxEndpoints::new(config),
        }
    }
}

#[async_trait(?Send)]
impl MapService for MapboxService {
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceSuggestion>, RequestError> {
        let response: PlaceResponse = make_request(&self.endpoints.place_search_url(query)).await?;
        Ok(response.features)
    }

    async fn geocode(&self, address: &str) -> Result<Option<LngLat>, RequestError> {
        let response: PlaceResponse = make_request(&self.endpoints.geocode_url(address)).await?;
        Ok(response.first_center())
    }

    async fn directions(&self, waypoints: &[LngLat]) -> Result<Option<DirectionsRoute>, RequestError> {
        let response: DirectionsResponse = make_request(&self.endpoints.directions_url(waypoints)).await?;
        Ok(response.into_route())
    }
}
