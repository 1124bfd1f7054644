use serde::{Deserialize, Serialize};

use crate::{
    coordinates::LngLat,
    error::RequestError,
    sequence::{RequestSequence, Ticket},
};

/// Queries shorter than this never reach the provider.
pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub id: String,
    pub place_name: String,
    pub center: LngLat,
}

/// A place search the caller has to run and feed back through [`PlaceSearch::apply_results`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    pub ticket: Ticket,
    pub query: String,
}

/// State behind one location search box.
#[derive(Debug, Default)]
pub struct PlaceSearch {
    input: String,
    suggestions: Vec<PlaceSuggestion>,
    sequence: RequestSequence,
}

impl PlaceSearch {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[PlaceSuggestion] {
        &self.suggestions
    }

    pub fn input_changed(&mut self, text: String) -> Option<PlaceQuery> {
        self.input = text;

        if self.input.chars().count() < MIN_QUERY_CHARS {
            self.suggestions.clear();
            self.sequence.invalidate();
            return None;
        }

        Some(PlaceQuery {
            ticket: self.sequence.issue(),
            query: self.input.clone(),
        })
    }

    /// Returns whether the results were applied. Stale responses are dropped,
    /// failures keep the previous suggestions.
    pub fn apply_results(&mut self, ticket: Ticket, results: Result<Vec<PlaceSuggestion>, RequestError>) -> bool {
        if !self.sequence.is_current(ticket) {
            tracing::debug!("Dropping stale place search response {:?}", ticket);
            return false;
        }

        match results {
            Ok(features) => {
                self.suggestions = features;
                true
            }
            Err(err) => {
                tracing::error!("Error fetching location suggestions: {}", err);
                false
            }
        }
    }

    /// Picks a suggestion and returns its `"<lng>,<lat>"` value.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let place = self.suggestions.get(index)?.clone();

        self.input = place.place_name;
        self.suggestions.clear();
        self.sequence.invalidate();

        Some(place.center.to_query_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(id: &str, name: &str, lng: f64, lat: f64) -> PlaceSuggestion {
        PlaceSuggestion {
            id: id.into(),
            place_name: name.into(),
            center: LngLat::new(lng, lat).unwrap(),
        }
    }

    #[test]
    fn short_input_clears_without_query() {
        let mut search = PlaceSearch::default();
        let query = search.input_changed("Austin".into()).unwrap();
        assert!(search.apply_results(query.ticket, Ok(vec![suggestion("a", "Austin", -97.7, 30.2)])));
        assert_eq!(search.suggestions().len(), 1);

        for text in ["", "A", "Au", "ÖÄ"] {
            assert_eq!(search.input_changed(text.into()), None);
            assert!(search.suggestions().is_empty());
        }
    }

    #[test]
    fn short_input_drops_in_flight_results() {
        let mut search = PlaceSearch::default();
        let query = search.input_changed("Dallas".into()).unwrap();
        search.input_changed("Da".into());

        assert!(!search.apply_results(query.ticket, Ok(vec![suggestion("d", "Dallas", -96.8, 32.8)])));
        assert!(search.suggestions().is_empty());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut search = PlaceSearch::default();
        let older = search.input_changed("Chi".into()).unwrap();
        let newer = search.input_changed("Chicago".into()).unwrap();
        assert_eq!(newer.query, "Chicago");

        assert!(search.apply_results(newer.ticket, Ok(vec![suggestion("c", "Chicago, Illinois", -87.6, 41.9)])));
        assert!(!search.apply_results(older.ticket, Ok(vec![suggestion("x", "Chico, California", -121.8, 39.7)])));
        assert_eq!(search.suggestions()[0].place_name, "Chicago, Illinois");
    }

    #[test]
    fn failure_keeps_previous_suggestions() {
        let mut search = PlaceSearch::default();
        let first = search.input_changed("Den".into()).unwrap();
        search.apply_results(first.ticket, Ok(vec![suggestion("d", "Denver", -104.9, 39.7)]));

        let second = search.input_changed("Denv".into()).unwrap();
        assert!(!search.apply_results(second.ticket, Err(RequestError::Network("offline".into()))));
        assert_eq!(search.suggestions().len(), 1);
    }

    #[test]
    fn empty_result_replaces_list() {
        let mut search = PlaceSearch::default();
        let first = search.input_changed("Den".into()).unwrap();
        search.apply_results(first.ticket, Ok(vec![suggestion("d", "Denver", -104.9, 39.7)]));

        let second = search.input_changed("Denxx".into()).unwrap();
        assert!(search.apply_results(second.ticket, Ok(Vec::new())));
        assert!(search.suggestions().is_empty());
    }

    #[test]
    fn selection_emits_longitude_first() {
        let mut search = PlaceSearch::default();
        let query = search.input_changed("Phoe".into()).unwrap();
        search.apply_results(
            query.ticket,
            Ok(vec![
                suggestion("p1", "Phoenix, Arizona", -112.074, 33.4484),
                suggestion("p2", "Phoenixville, Pennsylvania", -75.51, 40.13),
            ]),
        );

        assert_eq!(search.select(0).as_deref(), Some("-112.074,33.4484"));
        assert_eq!(search.input(), "Phoenix, Arizona");
        assert!(search.suggestions().is_empty());
        assert_eq!(search.select(0), None);
    }

    #[test]
    fn selection_drops_in_flight_results() {
        let mut search = PlaceSearch::default();
        let first = search.input_changed("Bos".into()).unwrap();
        search.apply_results(first.ticket, Ok(vec![suggestion("b", "Boston", -71.05, 42.36)]));
        let pending = search.input_changed("Bost".into()).unwrap();

        search.select(0);
        assert!(!search.apply_results(pending.ticket, Ok(vec![suggestion("b", "Boston", -71.05, 42.36)])));
        assert!(search.suggestions().is_empty());
    }
}
