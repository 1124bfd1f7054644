use serde::Serialize;

use crate::{
    error::RequestError,
    sequence::{RequestSequence, Ticket},
    trip::{LocationRole, TripResult},
};

/// Shown to the user for every failed submission; the cause only goes to the log.
pub const TRIP_FAILED_MESSAGE: &str = "Failed to process the trip. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFormInput {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub cycle_hours: String,
}

/// Body of `POST /create-trip/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub cycle_hours: f64,
}

impl TripFormInput {
    pub fn location_mut(&mut self, role: LocationRole) -> &mut String {
        match role {
            LocationRole::Current => &mut self.current_location,
            LocationRole::Pickup => &mut self.pickup_location,
            LocationRole::Dropoff => &mut self.dropoff_location,
        }
    }

    /// `None` until every location has been picked and the hours field holds a number.
    /// Ranges are left to the backend.
    pub fn to_request(&self) -> Option<CreateTripRequest> {
        let locations = [&self.current_location, &self.pickup_location, &self.dropoff_location];
        if locations.iter().any(|l| l.is_empty()) {
            return None;
        }

        let cycle_hours = self.cycle_hours.trim().parse::<f64>().ok().filter(|h| h.is_finite())?;

        Some(CreateTripRequest {
            current_location: self.current_location.clone(),
            pickup_location: self.pickup_location.clone(),
            dropoff_location: self.dropoff_location.clone(),
            cycle_hours,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    Succeeded(TripResult),
    Failed(String),
}

/// Form state plus the lifecycle of the trip request it submits.
#[derive(Debug, Default)]
pub struct TripRequestBuilder {
    input: TripFormInput,
    state: RequestState,
    sequence: RequestSequence,
}

impl TripRequestBuilder {
    pub fn input(&self) -> &TripFormInput {
        &self.input
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn set_location(&mut self, role: LocationRole, value: String) {
        *self.input.location_mut(role) = value;
    }

    pub fn set_cycle_hours(&mut self, value: String) {
        self.input.cycle_hours = value;
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.input.to_request().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state == RequestState::Submitting
    }

    pub fn result(&self) -> Option<&TripResult> {
        match &self.state {
            RequestState::Succeeded(trip) => Some(trip),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Starts a submission, dropping any previous result or error.
    /// Does nothing and returns `None` while the form is incomplete.
    pub fn submit(&mut self) -> Option<(Ticket, CreateTripRequest)> {
        let request = self.input.to_request()?;
        self.state = RequestState::Submitting;
        Some((self.sequence.issue(), request))
    }

    /// Returns whether the outcome was applied; outcomes of superseded submissions are ignored.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<TripResult, RequestError>) -> bool {
        if !self.sequence.is_current(ticket) {
            tracing::debug!("Ignoring outcome of superseded trip request {:?}", ticket);
            return false;
        }

        self.state = match outcome {
            Ok(trip) => RequestState::Succeeded(trip),
            Err(err) => {
                tracing::error!("Trip creation failed: {}", err);
                RequestState::Failed(TRIP_FAILED_MESSAGE.into())
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TripRequestBuilder {
        let mut builder = TripRequestBuilder::default();
        builder.set_location(LocationRole::Current, "-97.7431,30.2672".into());
        builder.set_location(LocationRole::Pickup, "-96.797,32.7767".into());
        builder.set_location(LocationRole::Dropoff, "-104.9903,39.7392".into());
        builder.set_cycle_hours("12".into());
        builder
    }

    #[test]
    fn incomplete_form_does_not_submit() {
        let mut builder = filled();
        builder.set_location(LocationRole::Pickup, String::new());
        assert!(!builder.can_submit());
        assert_eq!(builder.submit(), None);
        assert_eq!(builder.state(), &RequestState::Idle);

        let mut builder = filled();
        builder.set_cycle_hours("".into());
        assert_eq!(builder.submit(), None);
    }

    #[test]
    fn hours_range_is_not_checked() {
        let mut builder = filled();
        builder.set_cycle_hours("-3".into());
        let (_, request) = builder.submit().unwrap();
        assert_eq!(request.cycle_hours, -3.);
    }

    #[test]
    fn payload_matches_backend_shape() {
        let mut builder = filled();
        let (_, request) = builder.submit().unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "current_location": "-97.7431,30.2672",
                "pickup_location": "-96.797,32.7767",
                "dropoff_location": "-104.9903,39.7392",
                "cycle_hours": 12.0
            })
        );
    }

    #[test]
    fn success_stores_parsed_response() {
        let body = r#"{"trip": {"current_location": "1,2"}, "route_info": {"distance": "10.00 miles", "duration": "2.00 hours"}}"#;
        let parsed = TripResult::from_json(body).unwrap();

        let mut builder = filled();
        let (ticket, _) = builder.submit().unwrap();
        assert!(builder.is_loading());
        assert!(!builder.can_submit());

        assert!(builder.complete(ticket, Ok(parsed.clone())));
        assert!(!builder.is_loading());
        assert_eq!(builder.result(), Some(&parsed));
        assert_eq!(builder.error(), None);
    }

    #[test]
    fn failure_shows_generic_message() {
        let mut builder = filled();
        let (ticket, _) = builder.submit().unwrap();
        builder.complete(ticket, Err(RequestError::Status { status: 500, body: r#"{"error": "Failed to fetch valid route data from Mapbox"}"#.into() }));

        assert!(!builder.is_loading());
        assert_eq!(builder.result(), None);
        assert_eq!(builder.error(), Some(TRIP_FAILED_MESSAGE));
    }

    #[test]
    fn resubmission_clears_previous_outcome() {
        let mut builder = filled();
        let (ticket, _) = builder.submit().unwrap();
        builder.complete(ticket, Err(RequestError::Network("offline".into())));

        builder.submit().unwrap();
        assert_eq!(builder.error(), None);
        assert_eq!(builder.state(), &RequestState::Submitting);
    }

    #[test]
    fn superseded_outcome_is_ignored() {
        let mut builder = filled();
        let (first, _) = builder.submit().unwrap();
        let (second, _) = builder.submit().unwrap();

        assert!(!builder.complete(first, Ok(TripResult::default())));
        assert!(builder.is_loading());
        assert!(builder.complete(second, Err(RequestError::Decode("eof".into()))));
        assert_eq!(builder.error(), Some(TRIP_FAILED_MESSAGE));
    }
}
